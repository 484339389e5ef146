//! Application shell shared by every page.

use super::components::text;

/// Wrap page content in the full HTML document.
///
/// `head_extra` is trusted markup appended to `<head>` (used by the loading
/// page for its refresh).
#[must_use]
pub fn html_shell(title: &str, head_extra: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Recipe suggestions from what is already in your kitchen">
    <title>{title} - Pantry Chef</title>
    <link rel="stylesheet" href="/static/app.css">
    {head_extra}
</head>
<body>
    <div id="app-shell">
        <header class="app-header">
            <div class="container header-row">
                <a href="/" class="brand">Pantry Chef</a>
                <nav class="nav">
                    <a href="/">New search</a>
                    <a href="/favorites">Favorites</a>
                </nav>
            </div>
        </header>

        <main id="app" class="container">
            {content}
        </main>

        <footer class="app-footer">
            <p class="container muted">Nutrition values are estimates.</p>
        </footer>
    </div>
</body>
</html>"#,
        title = text(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_escapes_title() {
        let html = html_shell("<Results>", "", "<p>body</p>");
        assert!(html.contains("<title>&lt;Results&gt; - Pantry Chef</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
