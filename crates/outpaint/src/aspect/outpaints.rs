use serde::Serialize;
use strum::IntoEnumIterator;

use super::{AspectCatalog, AspectRatio};
use crate::{
    condition::{OutpaintCondition, OutpaintDescription},
    direction::Direction,
    types::Dimensions,
};

/// A catalog entry together with every actionable way to reach it.
#[derive(Debug, Clone, Serialize)]
pub struct AspectOutpaints {
    pub aspect: AspectRatio,
    pub outpaints: Vec<OutpaintDescription>,
}

impl AspectCatalog {
    /// Outpaint candidates for a `source` size, nearest catalog entries first.
    ///
    /// Entries outside the bounds, over budget, or equal to the source are
    /// skipped. Each remaining entry is classified once per anchor direction
    /// and keeps the descriptions whose action is not `None`. Anchors are
    /// used as requested, so an anchor across the scale axis filters out.
    pub fn outpaint_options(&self, source: Dimensions) -> Vec<AspectOutpaints> {
        let base = |aspect: &AspectRatio| OutpaintCondition::from_dimensions(source, aspect.dimensions());

        self.sorted_by_nearest(source)
            .into_iter()
            .filter(|aspect| {
                let dims = aspect.dimensions();
                self.params().within_bounds(dims) && self.params().fits_budget(dims) && dims != source
            })
            .map(|aspect| {
                let classified = base(aspect);
                let outpaints = Direction::iter()
                    .map(|direction| classified.with_anchor(direction))
                    .filter_map(|condition| {
                        condition
                            .action()
                            .description()
                            .map(|description| description.with_condition(condition))
                    })
                    .collect();
                AspectOutpaints {
                    aspect: aspect.clone(),
                    outpaints,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::OutpaintAction;

    #[test]
    fn test_source_size_is_never_a_candidate() {
        let catalog = AspectCatalog::new(1_048_576, 64, 256, 1536);
        let options = catalog.outpaint_options(Dimensions::new(1024, 1024));
        assert_eq!(options.len(), catalog.len() - 1);
        assert!(options.iter().all(|o| o.aspect.dimensions() != Dimensions::new(1024, 1024)));
    }

    #[test]
    fn test_square_source_to_landscape_entries() {
        let catalog = AspectCatalog::new(1_048_576, 64, 256, 1536);
        let options = catalog.outpaint_options(Dimensions::new(1024, 1024));
        let widescreen = options.iter().find(|o| o.aspect.label == "16:9").unwrap();
        let actions: Vec<OutpaintAction> = widescreen.outpaints.iter().map(|d| d.action).collect();
        assert_eq!(
            actions,
            vec![OutpaintAction::CenterHorizontal, OutpaintAction::ToLeft, OutpaintAction::ToRight]
        );
        for description in &widescreen.outpaints {
            assert!(description.condition.is_some());
        }
    }

    #[test]
    fn test_same_aspect_candidate_only_centers() {
        let catalog = AspectCatalog::new(1_048_576, 64, 256, 1536);
        let options = catalog.outpaint_options(Dimensions::new(512, 512));
        let square = options.iter().find(|o| o.aspect.label == "1:1").unwrap();
        assert_eq!(square.outpaints.len(), 1);
        assert_eq!(square.outpaints[0].action, OutpaintAction::ScaleUp);
    }
}
