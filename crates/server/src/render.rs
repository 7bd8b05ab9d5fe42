//! Server-side HTML rendering. Every page is rendered whole from the
//! session's view state; visible rows are a projection of the record store,
//! never patched independently of it.

use roster::ViewState;
use uuid::Uuid;

/// Elements toggled by the controller carry this class when invisible.
const HIDDEN_CLASS: &str = "hidden";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, extra_head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n{extra_head}\
         <style>.hidden {{ display: none; }}</style>\n</head>\n<body>\n\
         <header><h1>{title}</h1></header>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn visibility_class(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        HIDDEN_CLASS
    }
}

/// The main list page for one session. Ids and classes follow the markup
/// contract the end-to-end suite asserts against: `content-list`,
/// `li-node-{id}`, `message`, `add`, `form`, `deleteAll`.
pub fn index_page(sid: Uuid, view: &ViewState, time_seconds: i64) -> String {
    let mut rows = String::new();
    for row in &view.rows {
        let id = row.id;
        rows.push_str(&format!(
            "<li id=\"li-node-{id}\" data-id=\"{id}\"><span>{label}</span>\n\
             <form method=\"post\" action=\"/session/{sid}/records/{id}/update\">\n\
             <input class=\"first\" name=\"first\" value=\"{first}\">\n\
             <input class=\"last\" name=\"last\" value=\"{last}\">\n\
             <button class=\"update\" type=\"submit\">Update</button>\n\
             </form>\n\
             <form method=\"post\" action=\"/session/{sid}/records/{id}/remove\">\n\
             <button class=\"remove\" type=\"submit\">Remove</button>\n\
             </form>\n\
             </li>\n",
            label = escape_html(&row.label),
            first = escape_html(&row.first),
            last = escape_html(&row.last),
        ));
    }

    let body = format!(
        "<div id=\"message\">{message}</div>\n\
         <ul id=\"content-list\">\n{rows}</ul>\n\
         <form method=\"post\" action=\"/session/{sid}/form\">\n\
         <button id=\"add\" class=\"{add_class}\" type=\"submit\">Add</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/session/{sid}/records/remove-all\">\n\
         <button id=\"deleteAll\" class=\"{delete_all_class}\" type=\"submit\">Delete All</button>\n\
         </form>\n\
         <div id=\"form\" class=\"{form_class}\">\n\
         <form method=\"post\" action=\"/session/{sid}/records\">\n\
         <input id=\"new_first\" name=\"new_first\" value=\"\">\n\
         <input id=\"new_last\" name=\"new_last\" value=\"\">\n\
         <button id=\"submit\" type=\"submit\">Submit</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/session/{sid}/cancel\">\n\
         <button id=\"cancel\" type=\"submit\">Cancel</button>\n\
         </form>\n\
         </div>\n\
         <p id=\"time\">{time_seconds}</p>\n",
        message = escape_html(&view.message),
        add_class = visibility_class(view.add_visible),
        delete_all_class = visibility_class(view.delete_all_visible),
        form_class = visibility_class(view.form_visible),
    );
    page("Home Page", "", &body)
}

pub fn about_page() -> String {
    page(
        "About",
        "",
        "<p>A minimal demonstration of a server-rendered record list with \
         add, update, remove, and remove-all operations.</p>\n",
    )
}

/// Auto-refreshing page showing a per-session refresh counter.
pub fn grid_page(sid: Uuid, refresh_count: u64, time_seconds: i64) -> String {
    page(
        "Auto Refresh Grid Example",
        &format!("<meta http-equiv=\"refresh\" content=\"2;url=/grid/{sid}\">\n"),
        &format!(
            "<p id=\"refresh-count\">{refresh_count}</p>\n<p id=\"time\">{time_seconds}</p>\n"
        ),
    )
}
