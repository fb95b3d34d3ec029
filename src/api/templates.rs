//! HTML templates for the widget. Handlebars escapes everything by
//! default, which matters here since both the model's replies and
//! video titles come from third parties.

use std::fmt;

use handlebars::Handlebars;

#[derive(Debug)]
pub enum Page {
    Chat,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>IPL AI</title>
  <style>
    body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
    form.ask { display: flex; gap: 0.5rem; }
    form.ask input[type=text] { flex: 1; padding: 0.5rem; }
    .turn { white-space: pre-wrap; }
    .error { color: #b00020; background: #fdecea; padding: 0.5rem; border-radius: 4px; }
  </style>
</head>
<body>
  <h1>🏏 IPL AI</h1>
  <p>Explore IPL insights and related YouTube videos.</p>

  <form class="ask" method="post" action="/">
    <input type="hidden" name="session_id" value="{{session_id}}">
    <label for="message">You:</label>
    <input type="text" id="message" name="message" placeholder="Ask about IPL or cricket topics..." autofocus>
    <button type="submit">Send</button>
  </form>

  {{#if exchange}}
  <section class="exchange">
    <p class="turn"><strong>You:</strong> {{exchange.question}}</p>
    <p class="turn"><strong>IPL AI:</strong> {{exchange.answer}}</p>
    {{#each exchange.errors}}
    <p class="error">{{this}}</p>
    {{/each}}
  </section>

  <section class="videos">
    <h3>Related YouTube Videos</h3>
    <ul>
      {{#each exchange.videos}}
      <li><a href="{{url}}" target="_blank" rel="noopener">{{title}}</a></li>
      {{/each}}
    </ul>
  </section>
  {{/if}}

  <form method="post" action="/reset">
    <input type="hidden" name="session_id" value="{{session_id}}">
    <button type="submit">New conversation</button>
  </form>
</body>
</html>
"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(&Page::Chat.to_string(), CHAT_PAGE)
        .expect("Failed to register template");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_renders_an_empty_page() {
        let html = templates()
            .render(
                &Page::Chat.to_string(),
                &json!({"session_id": "abc", "exchange": null}),
            )
            .unwrap();
        assert!(html.contains("IPL AI"));
        assert!(html.contains(r#"name="session_id" value="abc""#));
        assert!(!html.contains("Related YouTube Videos"));
    }

    #[test]
    fn it_escapes_model_output() {
        let html = templates()
            .render(
                &Page::Chat.to_string(),
                &json!({
                    "session_id": "abc",
                    "exchange": {
                        "question": "hi",
                        "answer": "<script>alert(1)</script>",
                        "errors": [],
                        "videos": [{"title": "Final", "url": "https://www.youtube.com/watch?v=a1"}]
                    }
                }),
            )
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Related YouTube Videos"));
    }
}
