//! Detection of CSV links in order notes.

use once_cell::sync::Lazy;
use regex::Regex;

/// An HTTPS URL without whitespace that ends in `.csv`.
static CSV_LINK: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"https://\S+\.csv").expect("CSV link pattern must compile"));

/// Returns the first CSV link in `note`, if any.
///
/// Matching is greedy within a whitespace-free run, so the link ends at the last
/// `.csv` before the next whitespace.
pub fn extract_csv_url(note: &str) -> Option<&str> {
	CSV_LINK.find(note).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_link_inside_prose() {
		let note = "gift order, see https://cdn.example.com/list.csv for addresses";
		assert_eq!(
			extract_csv_url(note),
			Some("https://cdn.example.com/list.csv")
		);
	}

	#[test]
	fn test_first_of_several_links() {
		let note = "https://a.example.com/one.csv and https://b.example.com/two.csv";
		assert_eq!(extract_csv_url(note), Some("https://a.example.com/one.csv"));
	}

	#[test]
	fn test_query_string_after_extension_is_cut() {
		let note = "https://files.example.com/list.csv?token=abc";
		assert_eq!(
			extract_csv_url(note),
			Some("https://files.example.com/list.csv")
		);
	}

	#[test]
	fn test_no_link() {
		assert_eq!(extract_csv_url(""), None);
		assert_eq!(extract_csv_url("please gift wrap"), None);
		assert_eq!(extract_csv_url("http://cdn.example.com/list.csv"), None);
		assert_eq!(extract_csv_url("https://cdn.example.com/list.xlsx"), None);
		assert_eq!(extract_csv_url("https:// list.csv"), None);
	}
}
