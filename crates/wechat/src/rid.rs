//! Request id extraction from WeChat error messages

const RID_MARKER: &str = "rid:";

/// Extract the rid from an `errmsg` such as `"invalid code rid: 6412a3b4-..."`.
///
/// Returns an empty string when the message carries no rid.
pub fn parse_rid(errmsg: &str) -> String {
    let Some(index) = errmsg.find(RID_MARKER) else {
        return String::new();
    };
    // skip "rid: ", moving forward when that lands inside a multi-byte char
    let mut start = index + RID_MARKER.len() + 1;
    while start < errmsg.len() && !errmsg.is_char_boundary(start) {
        start += 1;
    }
    errmsg.get(start..).unwrap_or("").to_string()
}
