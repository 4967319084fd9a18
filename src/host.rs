//! Hand-off to the application that owns the scene.
//!
//! Material graphs and mesh UV layers live in the host's object model. The
//! library only tells the host which atlas files and UV rectangle belong to
//! each identifier.

use crate::atlas::{AtlasFiles, AtlasReport};
use crate::error::Result;
use crate::types::{Identifier, UvRect};

/// Trait for hosts that apply atlases to their own objects.
pub trait AtlasHost {
    /// Apply the atlas files and UV rectangle to the object(s) for `identifier`.
    fn apply_atlas(&mut self, identifier: &Identifier, files: &AtlasFiles, uv: &UvRect) -> Result<()>;
}

/// Counts from [`AtlasReport::apply_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub failed: usize,
}

impl AtlasReport {
    /// Call the host once per placed identifier.
    ///
    /// Host errors are logged per identifier and never stop the loop.
    pub fn apply_to<H: AtlasHost + ?Sized>(&self, host: &mut H) -> ApplySummary {
        let mut summary = ApplySummary::default();
        if self.files.is_empty() {
            log::warn!("No atlas files were saved; nothing to apply");
            return summary;
        }

        for placement in &self.placements {
            match host.apply_atlas(&placement.identifier, &self.files, &placement.uv) {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    log::warn!("Host failed to apply atlas to '{}': {}", placement.identifier, e);
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasBuilder;
    use crate::error::AtlasError;
    use crate::source::texture::solid_image;
    use crate::source::MemorySource;
    use crate::types::{MapKind, OrderList};

    #[derive(Default)]
    struct RecordingHost {
        applied: Vec<(String, UvRect)>,
    }

    impl AtlasHost for RecordingHost {
        fn apply_atlas(&mut self, identifier: &Identifier, files: &AtlasFiles, uv: &UvRect) -> Result<()> {
            if identifier.as_str() == "locked" {
                return Err(AtlasError::Host("object is locked".to_string()));
            }
            assert!(files.contains_key(&MapKind::Color));
            self.applied.push((identifier.to_string(), *uv));
            Ok(())
        }
    }

    #[test]
    fn test_apply_to_host() {
        let dir = tempfile::tempdir().unwrap();
        let order = OrderList::from_names(["alpha", "locked", "gamma"]);
        let source = MemorySource::new()
            .with("alpha", MapKind::Color, solid_image(4, 4, [255, 0, 0, 255]))
            .with("gamma", MapKind::Color, solid_image(4, 4, [0, 0, 255, 255]));

        let report = AtlasBuilder::default()
            .build(&order, &source)
            .unwrap()
            .save(dir.path());

        let mut host = RecordingHost::default();
        let summary = report.apply_to(&mut host);

        assert_eq!(summary, ApplySummary { applied: 2, failed: 1 });
        assert_eq!(host.applied[0].0, "alpha");
        assert_eq!(host.applied[1].0, "gamma");
        assert_eq!(host.applied[1].1, report.placements[2].uv);
    }
}
