//! HTML directory listings for directories that have no index file.

use crate::handler::router::RequestContext;
use crate::http::{response, Body};
use hyper::Response;
use std::path::Path;
use tokio::fs;

pub async fn render(ctx: &RequestContext<'_>, dir: &Path) -> Response<Body> {
    let mut entries = match collect(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "failed to list directory");
            return response::not_found();
        }
    };
    entries.sort();

    response::html_page(render_page(ctx.path, &entries), ctx.is_head)
}

/// Collect entry names, marking directories with a trailing slash.
/// Names that aren't valid UTF-8 are skipped.
async fn collect(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        names.push(if is_dir { format!("{name}/") } else { name });
    }
    Ok(names)
}

fn render_page(request_path: &str, entries: &[String]) -> String {
    let title = escape_html(request_path);
    let mut items = String::new();
    for name in entries {
        let escaped = escape_html(name);
        items.push_str(&format!(
            "        <li><a href=\"{escaped}\">{escaped}</a></li>\n"
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>Index of {title}</title>\n\
         </head>\n\
         <body>\n\
         <h1>Index of {title}</h1>\n\
         <hr>\n\
         <ul>\n{items}    </ul>\n\
         <hr>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn page_links_every_entry() {
        let entries = vec!["Music/".to_string(), "index.html".to_string()];
        let page = render_page("/", &entries);
        assert!(page.contains("<title>Index of /</title>"));
        assert!(page.contains("<a href=\"Music/\">Music/</a>"));
        assert!(page.contains("<a href=\"index.html\">index.html</a>"));
    }

    #[test]
    fn file_names_are_html_escaped() {
        let entries = vec!["a<b>&\"c\".txt".to_string()];
        let page = render_page("/", &entries);
        assert!(page.contains("a&lt;b&gt;&amp;&quot;c&quot;.txt"));
        assert!(!page.contains("<b>"));
    }

    #[tokio::test]
    async fn collect_marks_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("song.mp3"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("covers")).unwrap();

        let mut names = collect(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, ["covers/", "song.mp3"]);
    }
}
