//! Object locator implementations.
//!
//! Neither locator does real ball detection. [`CenterLocator`] captures its
//! region and reports the region center; [`ReplayLocator`] replays
//! positions observed earlier.

use std::collections::VecDeque;

use ballbot_common::error::{BallbotError, BallbotResult};
use ballbot_kinematics::Vector2D;

use crate::region::ScreenRegion;
use crate::{FrameSource, ObjectLocator};

/// Grabs the watched region every tick and reports its center.
pub struct CenterLocator<F> {
    source: F,
    region: ScreenRegion,
    frames_grabbed: u64,
}

impl<F: FrameSource> CenterLocator<F> {
    pub fn new(source: F, region: ScreenRegion) -> Self {
        Self {
            source,
            region,
            frames_grabbed: 0,
        }
    }

    pub fn region(&self) -> &ScreenRegion {
        &self.region
    }

    pub fn frames_grabbed(&self) -> u64 {
        self.frames_grabbed
    }
}

impl<F: FrameSource> ObjectLocator for CenterLocator<F> {
    fn locate(&mut self) -> BallbotResult<Vector2D> {
        let frame = self.source.grab(&self.region)?;
        let bounds = self.region.capture_bounds();
        if (frame.width(), frame.height()) != (bounds.width, bounds.height) {
            return Err(BallbotError::capture(format!(
                "{} returned a {}x{} frame for a {}x{} region",
                self.source.name(),
                frame.width(),
                frame.height(),
                bounds.width,
                bounds.height
            )));
        }
        self.frames_grabbed += 1;
        Ok(self.region.center())
    }

    fn name(&self) -> &str {
        "center"
    }
}

/// Replays a finite sequence of recorded positions, then reports
/// [`BallbotError::NoFrameAvailable`].
#[derive(Debug, Clone, Default)]
pub struct ReplayLocator {
    positions: VecDeque<Vector2D>,
    replayed: usize,
}

impl ReplayLocator {
    pub fn new(positions: impl IntoIterator<Item = Vector2D>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            replayed: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.positions.len()
    }
}

impl ObjectLocator for ReplayLocator {
    fn locate(&mut self) -> BallbotResult<Vector2D> {
        match self.positions.pop_front() {
            Some(position) => {
                self.replayed += 1;
                Ok(position)
            }
            None => Err(BallbotError::no_frame(format!(
                "replay exhausted after {} observations",
                self.replayed
            ))),
        }
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Frame;

    struct BlankScreen;

    impl FrameSource for BlankScreen {
        fn grab(&mut self, region: &ScreenRegion) -> BallbotResult<Frame> {
            let bounds = region.capture_bounds();
            let len = bounds.width as usize * bounds.height as usize * 3;
            Frame::new(bounds.width, bounds.height, vec![0; len])
        }

        fn name(&self) -> &str {
            "blank"
        }
    }

    struct UnpluggedScreen;

    impl FrameSource for UnpluggedScreen {
        fn grab(&mut self, _region: &ScreenRegion) -> BallbotResult<Frame> {
            Err(BallbotError::capture("display disconnected"))
        }

        fn name(&self) -> &str {
            "unplugged"
        }
    }

    struct TinyScreen;

    impl FrameSource for TinyScreen {
        fn grab(&mut self, _region: &ScreenRegion) -> BallbotResult<Frame> {
            Frame::new(1, 1, vec![0; 3])
        }

        fn name(&self) -> &str {
            "tiny"
        }
    }

    #[test]
    fn test_center_locator_reports_region_center() {
        let region = ScreenRegion::from_bounds(10, 20, 100, 50);
        let mut locator = CenterLocator::new(BlankScreen, region);
        assert_eq!(locator.locate().unwrap(), Vector2D::new(60.0, 45.0));
        assert_eq!(locator.locate().unwrap(), Vector2D::new(60.0, 45.0));
        assert_eq!(locator.frames_grabbed(), 2);
    }

    #[test]
    fn test_center_locator_propagates_capture_error() {
        let mut locator = CenterLocator::new(UnpluggedScreen, ScreenRegion::from_bounds(0, 0, 4, 4));
        assert!(matches!(
            locator.locate(),
            Err(BallbotError::Capture { .. })
        ));
        assert_eq!(locator.frames_grabbed(), 0);
    }

    #[test]
    fn test_center_locator_rejects_mismatched_frame() {
        let mut locator = CenterLocator::new(TinyScreen, ScreenRegion::from_bounds(0, 0, 4, 4));
        let err = locator.locate().unwrap_err();
        assert!(err.to_string().contains("1x1 frame for a 4x4 region"));
    }

    #[test]
    fn test_replay_locator_exhausts() {
        let mut locator = ReplayLocator::new([Vector2D::new(1.0, 2.0), Vector2D::new(3.0, 4.0)]);
        assert_eq!(locator.remaining(), 2);
        assert_eq!(locator.locate().unwrap(), Vector2D::new(1.0, 2.0));
        assert_eq!(locator.locate().unwrap(), Vector2D::new(3.0, 4.0));

        let err = locator.locate().unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(
            err.to_string(),
            "No frame available: replay exhausted after 2 observations"
        );
    }
}
