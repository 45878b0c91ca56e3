use regex::Regex;

lazy_static! {
  static ref VALID_USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("compile username regex");
}

pub fn is_valid_username(name: &str) -> bool {
  VALID_USERNAME_REGEX.is_match(name)
}

/// Uploaded files are accepted for the image field only when the declared
/// content type is an image one.
pub fn is_image_content_type(content_type: &str) -> bool {
  content_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
  use crate::utils::{is_image_content_type, is_valid_username};

  #[test]
  fn test_valid_username() {
    assert!(is_valid_username("sara"));
    assert!(is_valid_username("sara_1"));
    assert!(!is_valid_username("no"));
    assert!(!is_valid_username(""));
    assert!(!is_valid_username("sara sara"));
    assert!(!is_valid_username("sara@example.com"));
    assert!(!is_valid_username("a_name_way_too_long_for_the_limit"));
  }

  #[test]
  fn test_image_content_type() {
    assert!(is_image_content_type("image/png"));
    assert!(is_image_content_type("image/jpeg"));
    assert!(!is_image_content_type("text/html"));
    assert!(!is_image_content_type("application/pdf"));
    assert!(!is_image_content_type(""));
  }
}
