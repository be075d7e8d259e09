/// Possessive form of a name: `Chris` -> `Chris'`, `Alex` -> `Alex's`.
pub fn make_possessive(name: &str) -> String {
    if name.ends_with('s') {
        format!("{name}'")
    } else {
        format!("{name}'s")
    }
}
