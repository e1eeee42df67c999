//! HTML pages

use html_escape::{encode_double_quoted_attribute, encode_text};
use memdesk_core::MemoryKind;
use std::fmt::Write;

const INDEX_STYLE: &str = "\
.memory-box { margin: 20px; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }
.memory-box pre { white-space: pre-wrap; word-break: break-word; }
.btn { display: block; margin-top: 10px; padding: 5px 10px; background: #007bff; color: white; text-decoration: none; border-radius: 3px; }
.btn:hover { background: #0056b3; }";

/// One memory file as shown on the home page
pub struct MemorySection<'a> {
    pub kind: MemoryKind,
    pub filename: &'a str,
    pub content: String,
}

fn section_icon(kind: MemoryKind) -> &'static str {
    match kind {
        MemoryKind::Long => "📜",
        MemoryKind::Short => "💡",
    }
}

/// Home page with both memory files
pub fn render_index(sections: &[MemorySection<'_>]) -> String {
    let mut body = String::new();
    for section in sections {
        let label = section.kind.label();
        // The newline after <pre> is dropped by HTML parsers, so content that
        // starts with its own newline survives.
        let _ = write!(
            body,
            r#"
    <div class="memory-box" id="{key}-memory">
        <h2>{icon} {label}文件</h2>
        <pre>
{content}</pre>
        <hr>
        <a href="/edit/{href}" class="btn">✍️ 修改{label}</a>
    </div>
"#,
            key = section.kind.key(),
            icon = section_icon(section.kind),
            label = label,
            content = encode_text(&section.content),
            href = encode_double_quoted_attribute(&urlencoding::encode(section.filename)),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>记忆管理系统</title>
    <style>
{style}
    </style>
</head>
<body>
    <h1>记忆管理系统</h1>
{body}</body>
</html>
"#,
        style = INDEX_STYLE,
        body = body,
    )
}

/// Edit form for one file
pub fn render_edit(filename: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>编辑文件：{filename}</title>
</head>
<body>
    <div style="max-width: 800px; margin: 50px auto; padding: 20px; background: #fff; border: 1px solid #ddd;">
        <h2>编辑文件：{filename}</h2>
        <form method="post">
            <textarea name="content" style="width: 100%; height: 400px;" placeholder="在此输入文本内容...">
{content}</textarea>
            <br>
            <button type="submit" style="padding: 10px 20px; background: #007bff; color: white; border: none; border-radius: 3px; cursor: pointer;">保存修改</button>
            <a href="/" style="display: inline-block; margin-left: 10px; padding: 10px 20px; background: #ffc107; color: black; text-decoration: none; border-radius: 3px;">取消</a>
        </form>
    </div>
</body>
</html>
"#,
        filename = encode_text(filename),
        content = encode_text(content),
    )
}
