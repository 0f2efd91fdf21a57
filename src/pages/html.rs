use axum::response::Html;

/// Escape text interpolated into HTML. Everything user-supplied goes
/// through here before it reaches a page.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page shell. `body` is trusted markup; callers escape their own
/// interpolations.
pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <nav>\
         <a href=\"/\">Jobs</a> | \
         <a href=\"/profile\">Profile</a> | \
         <a href=\"/employer\">Employer</a> | \
         <a href=\"/signin\">Sign in</a> | \
         <a href=\"/signup\">Sign up</a> | \
         <a href=\"/logout\">Log out</a>\
         </nav>\n\
         <main>\n{body}\n</main>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    ))
}

/// Red box shown above forms when submission failed.
pub fn form_error(message: &str) -> String {
    format!(
        "<p style=\"color: #b00020\" role=\"alert\">{}</p>",
        escape(message)
    )
}
