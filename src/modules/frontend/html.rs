/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub struct Page<'a> {
    pub title: &'a str,
    /// Value of `data-page` on `<body>`, picks the script entry point.
    pub name: &'a str,
    pub body: String,
    pub head: &'a str,
}

pub fn layout(page: Page) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Food Delivery</title>
<link rel="stylesheet" href="/assets/app.css">
{head}
</head>
<body data-page="{name}">
<header class="top">
  <a class="brand" href="/">Food Delivery</a>
  <nav>
    <a href="/dashboard/customer" data-role="CUSTOMER" hidden>My orders</a>
    <a href="/dashboard/restaurant" data-role="RESTAURANT_OWNER" hidden>My restaurants</a>
    <a href="/dashboard/driver" data-role="DRIVER" hidden>Deliveries</a>
    <a href="/sign-in" data-guest>Sign in</a>
    <a href="/sign-up" data-guest>Sign up</a>
    <button type="button" id="sign-out" data-member hidden>Sign out</button>
  </nav>
</header>
<main>
{body}
</main>
<script src="/assets/app.js"></script>
</body>
</html>
"#,
        title = escape(page.title),
        name = escape(page.name),
        head = page.head,
        body = page.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#x27;y&#x27;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape("Mama Put, Yaba"), "Mama Put, Yaba");
    }

    #[test]
    fn layout_escapes_the_title() {
        let html = layout(Page {
            title: "<b>Menu</b>",
            name: "home",
            body: String::new(),
            head: "",
        });
        assert!(html.contains("<title>&lt;b&gt;Menu&lt;/b&gt; · Food Delivery</title>"));
        assert!(html.contains(r#"data-page="home""#));
    }
}
