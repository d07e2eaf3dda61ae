//! Property tests for scratch file naming.

use proptest::prelude::*;

use ckan_mirror::infrastructure::scratch::scratch_file_name;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: naming never panics on arbitrary URLs.
    #[test]
    fn property_name_never_panics(id in "[a-f0-9-]{1,36}", url in "(?s).{0,128}") {
        let _ = scratch_file_name(&id, &url);
    }

    /// PROPERTY: plain ids are kept verbatim as the name prefix.
    #[test]
    fn property_plain_id_is_prefix(id in "[a-f0-9-]{1,36}", url in "(?s).{0,128}") {
        let name = scratch_file_name(&id, &url);
        let prefix = format!("{}-", id);
        prop_assert!(name.starts_with(&prefix));
    }

    /// PROPERTY: the name never escapes the scratch directory, whatever the
    /// catalog puts in the id or the URL.
    #[test]
    fn property_name_is_one_component(id in "(?s).{1,36}", url in "(?s).{0,128}") {
        let name = scratch_file_name(&id, &url);
        prop_assert!(!name.contains('/'));
        prop_assert!(!name.contains('\\'));

        let root = std::path::Path::new("scratch");
        let joined = root.join(&name);
        prop_assert_eq!(joined.parent(), Some(root));
    }
}
