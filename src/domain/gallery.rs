// Gallery value types - image collections and slide rows
use serde::Serialize;

/// Ordered collection of image filenames for one product.
///
/// Holds bare filenames only; joining against the image directory yields a
/// path. The collection does not verify that the files exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    images: Vec<String>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { images: names }
    }

    /// Append a filename to the collection.
    pub fn add(&mut self, name: impl Into<String>) {
        self.images.push(name.into());
    }

    /// Remove every entry matching `name`; no-op when the value is absent.
    pub fn remove(&mut self, name: &str) {
        self.images.retain(|image| image != name);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.images.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.images
    }
}

/// One slideshow entry, serialized as the `[src, href, caption, filename]`
/// row the page script consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideRow(pub String, pub String, pub String, pub String);

impl SlideRow {
    /// Row for `filename` served at `url`; the image links to itself and the
    /// caption stays empty.
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        let url = url.into();
        Self(url.clone(), url, String::new(), filename.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut set = ImageSet::new();
        set.add("kbis_br1_0.png");
        set.add("kbis_br1_1.png");
        assert_eq!(set.len(), 2);

        set.remove("kbis_br1_0.png");
        assert_eq!(set.as_slice(), ["kbis_br1_1.png"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = ImageSet::from_names(vec!["kbis_br1_0.png".to_string()]);
        set.remove("kbis_cr_0.png");
        assert_eq!(set.as_slice(), ["kbis_br1_0.png"]);
    }

    #[test]
    fn test_remove_drops_every_occurrence() {
        let mut set = ImageSet::new();
        set.add("dup.png");
        set.add("keep.png");
        set.add("dup.png");
        set.remove("dup.png");
        assert_eq!(set.as_slice(), ["keep.png"]);
    }

    #[test]
    fn test_slide_row_serializes_as_array() {
        let row = SlideRow::new("/radar/kbis_br1_0.png", "kbis_br1_0.png");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"["/radar/kbis_br1_0.png","/radar/kbis_br1_0.png","","kbis_br1_0.png"]"#
        );
    }
}
