//! Minimal document summary for the fetch view: title, readable text and
//! outgoing links. Not an HTML parser; it only scans for what it shows.

use url::Url;

const PREVIEW_CHARS: usize = 1200;
const MAX_LINKS: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub url: String,
    pub title: String,
    pub preview: String,
    pub links: Vec<Link>,
}

impl PageSummary {
    pub fn from_html(url: &str, html: &str) -> Self {
        // ASCII lowercasing keeps byte offsets aligned with `html`
        let lower = html.to_ascii_lowercase();
        let base = Url::parse(url).ok();
        Self {
            url: url.to_string(),
            title: extract_title(html, &lower).unwrap_or_default(),
            preview: extract_text(html, &lower),
            links: extract_links(html, &lower, base.as_ref()),
        }
    }

    pub fn plain(url: &str, body: &str) -> Self {
        Self {
            url: url.to_string(),
            preview: body.chars().take(PREVIEW_CHARS).collect(),
            ..Self::default()
        }
    }
}

fn extract_title(html: &str, lower: &str) -> Option<String> {
    let open = lower.find("<title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;
    let title = collapse_whitespace(&decode_entities(&html[start..end]));
    (!title.is_empty()).then_some(title)
}

fn extract_text(html: &str, lower: &str) -> String {
    let body_start = lower.find("<body").unwrap_or(0);
    let mut text = String::new();
    let mut pos = body_start;
    while pos < html.len() {
        let Some(rel) = lower[pos..].find('<') else {
            text.push_str(&html[pos..]);
            break;
        };
        text.push_str(&html[pos..pos + rel]);
        text.push(' ');
        let tag_start = pos + rel;
        let Some(tag_len) = lower[tag_start..].find('>') else {
            break;
        };
        pos = tag_start + tag_len + 1;

        for skipped in ["script", "style", "noscript"] {
            if lower[tag_start + 1..].starts_with(skipped) {
                let close = format!("</{skipped}");
                pos = lower[pos..]
                    .find(&close)
                    .map(|i| pos + i)
                    .unwrap_or(html.len());
            }
        }
        if text.len() > PREVIEW_CHARS * 8 {
            break;
        }
    }
    collapse_whitespace(&decode_entities(&text))
        .chars()
        .take(PREVIEW_CHARS)
        .collect()
}

fn extract_links(html: &str, lower: &str, base: Option<&Url>) -> Vec<Link> {
    let mut links: Vec<Link> = Vec::new();
    let mut pos = 0;
    loop {
        let rel = match (lower[pos..].find("<a"), lower[pos..].find("<script")) {
            (Some(a), Some(s)) if s < a => {
                let after = pos + s + "<script".len();
                pos = lower[after..]
                    .find("</script")
                    .map(|i| after + i)
                    .unwrap_or(html.len());
                continue;
            }
            (Some(a), _) => a,
            (None, _) => break,
        };
        let tag_start = pos + rel;
        pos = tag_start + 2;
        // `<abbr>`, `<area>` and friends
        if !lower[pos..].starts_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }
        let Some(tag_len) = lower[tag_start..].find('>') else {
            break;
        };
        let tag_end = tag_start + tag_len;
        let Some(href) = attribute(&html[tag_start..tag_end], &lower[tag_start..tag_end], "href")
        else {
            continue;
        };
        let text_end = lower[tag_end..]
            .find("</a")
            .map(|i| tag_end + i)
            .unwrap_or(tag_end + 1);
        let text = extract_text(&html[tag_end + 1..text_end], &lower[tag_end + 1..text_end]);
        pos = text_end;

        let href = decode_entities(&href);
        let resolved = match base {
            Some(base) => base.join(&href).map(|u| u.to_string()).ok(),
            None => Url::parse(&href).map(|u| u.to_string()).ok(),
        };
        let Some(href) = resolved else {
            continue;
        };
        if links.iter().any(|l| l.href == href) {
            continue;
        }
        let text = if text.is_empty() { href.clone() } else { text };
        links.push(Link { href, text });
        if links.len() == MAX_LINKS {
            break;
        }
    }
    links
}

fn attribute(tag: &str, lower_tag: &str, name: &str) -> Option<String> {
    let mut from = 0;
    while let Some(rel) = lower_tag[from..].find(name) {
        let at = from + rel;
        from = at + name.len();
        let preceded_by_space = lower_tag[..at].ends_with(|c: char| c.is_ascii_whitespace());
        let rest = lower_tag[from..].trim_start();
        if !preceded_by_space || !rest.starts_with('=') {
            continue;
        }
        let value_start = tag.len() - rest.len() + 1;
        let value = tag[value_start..].trim_start();
        return match value.chars().next()? {
            quote @ ('"' | '\'') => {
                let inner = &value[1..];
                Some(inner[..inner.find(quote)?].to_string())
            }
            _ => Some(
                value
                    .split(|c: char| c.is_ascii_whitespace() || c == '>')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            ),
        };
    }
    None
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<!doctype html>
<html><head><TITLE> Meshur &amp; Co </TITLE>
<style>body { color: red }</style></head>
<body>
  <h1>Welcome</h1>
  <script>var x = "<a href='/nope'>";</script>
  <p>Local   <abbr>food</abbr> specialties.</p>
  <a href="/kategori/tatli">Desserts</a>
  <A class="x" HREF='https://other.example/'>Elsewhere</A>
  <a href=/plain>Plain</a>
  <a href="/kategori/tatli">Desserts again</a>
  <a name="anchor-without-href">skip</a>
</body></html>"#;

    #[test]
    fn title_is_decoded_and_trimmed() {
        let page = PageSummary::from_html("https://www.meshur.co/", DOC);
        assert_eq!(page.title, "Meshur & Co");
    }

    #[test]
    fn preview_skips_markup_scripts_and_styles() {
        let page = PageSummary::from_html("https://www.meshur.co/", DOC);
        assert!(page.preview.starts_with("Welcome Local food specialties."));
        assert!(!page.preview.contains("var x"));
        assert!(!page.preview.contains("color: red"));
    }

    #[test]
    fn links_are_resolved_and_deduplicated() {
        let page = PageSummary::from_html("https://www.meshur.co/", DOC);
        let hrefs: Vec<&str> = page.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            [
                "https://www.meshur.co/kategori/tatli",
                "https://other.example/",
                "https://www.meshur.co/plain",
            ]
        );
        assert_eq!(page.links[0].text, "Desserts");
    }

    #[test]
    fn plain_text_documents_keep_their_body() {
        let page = PageSummary::plain("https://x/", "just text");
        assert_eq!(page.preview, "just text");
        assert!(page.links.is_empty());
    }
}
