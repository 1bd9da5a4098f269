//! Deferred image loading.
//!
//! Images carry their real source in a deferred attribute. The first time one
//! intersects the viewport the source is promoted, the deferred attribute is
//! dropped, and the image leaves the watch list for good.

use crate::app::Action;
use crate::domain::{Document, Markers, NodeId, Result};
use crate::watch::{IntersectionEntry, IntersectionOptions, WatchList};

#[derive(Debug, Clone)]
pub struct LazyMediaLoader {
    deferred_attr: String,
    watch: WatchList,
}

impl LazyMediaLoader {
    #[must_use]
    pub fn install(doc: &Document, markers: &Markers) -> Option<Self> {
        let images: Vec<NodeId> = doc
            .find_by_attr(doc.root(), &markers.deferred_source_attr)
            .into_iter()
            .filter(|&id| doc.get(id).is_some_and(|el| el.tag.eq_ignore_ascii_case("img")))
            .collect();

        if images.is_empty() {
            tracing::debug!("no deferred images, lazy media loader not installed");
            return None;
        }

        let mut loader = Self {
            deferred_attr: markers.deferred_source_attr.clone(),
            watch: WatchList::new(IntersectionOptions::DEFAULT),
        };
        loader.observe(&images);
        tracing::debug!(observed = images.len(), "lazy media loader installed");
        Some(loader)
    }

    pub fn observe(&mut self, images: &[NodeId]) {
        for &image in images {
            self.watch.observe(image);
        }
    }

    #[must_use]
    pub const fn watch_list(&self) -> &WatchList {
        &self.watch
    }

    pub fn watch_list_mut(&mut self) -> &mut WatchList {
        &mut self.watch
    }

    /// Loads every image hit by `entries`, returning one fetch action each.
    ///
    /// # Errors
    ///
    /// Returns an error if an image was removed from the document.
    pub fn on_entries(&mut self, doc: &mut Document, entries: &[IntersectionEntry]) -> Result<Vec<Action>> {
        let mut actions = Vec::new();
        for entry in entries {
            if !self.watch.accepts(entry) {
                continue;
            }
            self.watch.unobserve(entry.target);

            let Some(src) = doc.remove_attr(entry.target, &self.deferred_attr)? else {
                tracing::debug!(image = %entry.target, "deferred source already consumed");
                continue;
            };
            doc.set_attr(entry.target, "src", &src)?;
            tracing::debug!(image = %entry.target, src = %src, "image loaded");
            actions.push(Action::FetchImage {
                image: entry.target,
                src,
            });
        }
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementSpec;

    fn hit(target: NodeId) -> IntersectionEntry {
        IntersectionEntry {
            target,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    #[test]
    fn deferred_source_is_consumed_exactly_once() {
        let mut doc = Document::new();
        let body = doc.body();
        let img = doc
            .append(body, ElementSpec::new("img").attr("data-src", "/static/img/store.jpg"))
            .unwrap();
        let mut loader = LazyMediaLoader::install(&doc, &Markers::default()).unwrap();

        let first = loader.on_entries(&mut doc, &[hit(img), hit(img)]).unwrap();
        assert_eq!(
            first,
            vec![Action::FetchImage {
                image: img,
                src: "/static/img/store.jpg".to_string()
            }]
        );
        assert_eq!(doc.attr(img, "src"), Some("/static/img/store.jpg"));
        assert_eq!(doc.attr(img, "data-src"), None);

        assert!(loader.on_entries(&mut doc, &[hit(img)]).unwrap().is_empty());
        assert!(loader.watch_list().is_empty());
    }

    #[test]
    fn non_intersecting_entry_keeps_image_queued() {
        let mut doc = Document::new();
        let body = doc.body();
        let img = doc.append(body, ElementSpec::new("img").attr("data-src", "a.png")).unwrap();
        let mut loader = LazyMediaLoader::install(&doc, &Markers::default()).unwrap();

        let miss = IntersectionEntry {
            target: img,
            is_intersecting: false,
            ratio: 0.0,
        };
        assert!(loader.on_entries(&mut doc, &[miss]).unwrap().is_empty());
        assert!(loader.watch_list().contains(img));
    }

    #[test]
    fn only_images_are_observed() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append(body, ElementSpec::new("div").attr("data-src", "x")).unwrap();
        assert!(LazyMediaLoader::install(&doc, &Markers::default()).is_none());
    }
}
