//! HTML escaping for values echoed back into pages

/// Escape HTML special characters
///
/// Both quote styles are escaped, so the result is safe inside single- or
/// double-quoted attributes.
///
/// # Examples
///
/// ```
/// use calculator_core::security::escape_html;
///
/// let escaped = escape_html(r#"<b class="x">Tom & 'Jerry'</b>"#);
/// assert_eq!(
/// 	escaped,
/// 	"&lt;b class=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
/// );
/// ```
pub fn escape_html(input: &str) -> String {
	let mut escaped = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}
