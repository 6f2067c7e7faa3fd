//! Storage filename generation.
//!
//! Names are `<uuid-v4>.<ext>`. Nothing from the client's original filename
//! is reused except the already validated extension.

use uuid::Uuid;

/// Generate a fresh storage filename for the given extension.
///
/// `extension` may be given with or without its leading dot and is lower-cased.
pub fn generate_file_name(extension: &str) -> String {
    let ext = extension.trim_start_matches('.').to_lowercase();
    format!("{}.{}", Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::validation::validate_file_path;
    use std::collections::HashSet;

    #[test]
    fn test_generate_file_name_format() {
        let name = generate_file_name(".PNG");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "png");
        assert!(Uuid::parse_str(stem).is_ok());
        assert!(validate_file_path(&name));
    }

    #[test]
    fn test_generate_file_name_accepts_bare_extension() {
        assert!(generate_file_name("webp").ends_with(".webp"));
    }

    #[test]
    fn test_generate_file_name_unique() {
        let names: HashSet<String> = (0..1000).map(|_| generate_file_name(".jpg")).collect();
        assert_eq!(names.len(), 1000);
    }
}
