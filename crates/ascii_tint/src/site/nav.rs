/// Page assumed when the path ends in a directory.
pub const INDEX_PAGE: &str = "index.html";

/// Lowercased file name of the current page.
pub fn current_page(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or_default();
    if name.is_empty() {
        INDEX_PAGE.to_owned()
    } else {
        name.to_lowercase()
    }
}

pub fn is_active(href: &str, here: &str) -> bool {
    href.to_lowercase() == here
}

/// Active flag for each link, matched by exact file name.
pub fn mark_active<S: AsRef<str>>(hrefs: &[S], path: &str) -> Vec<bool> {
    let here = current_page(path);
    hrefs.iter().map(|href| is_active(href.as_ref(), &here)).collect()
}
