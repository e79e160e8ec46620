use crate::{
    element::Element,
    error::{Error, Result},
};

/// Tracks how deeply aggregates and references are nested while walking a value.
#[derive(Clone, Debug)]
pub struct DepthTracker {
    depth: usize,
    max: usize,
}

impl DepthTracker {
    /// Create a new depth tracker
    pub fn new(max: usize) -> Self {
        Self { depth: 0, max }
    }

    /// Update the depth tracker on each element about to be serialized. Hashes, arrays and
    /// references open a new level, which must later be closed with [`DepthTracker::end`].
    pub fn update_elem(&mut self, elem: &Element) -> Result<()> {
        match elem {
            Element::Hash(_) | Element::Array(_) | Element::Ref => self.depth += 1,
            Element::Scalar(_) | Element::Key(_) => return Ok(()),
        }
        if self.depth > self.max {
            return Err(Error::DepthLimit(self.max));
        }
        Ok(())
    }

    /// Close the innermost open level.
    pub fn end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_dont_nest() {
        let mut tracker = DepthTracker::new(0);
        tracker.update_elem(&Element::Scalar(b"1")).unwrap();
        tracker.update_elem(&Element::Key("a")).unwrap();
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn limit() {
        let mut tracker = DepthTracker::new(2);
        tracker.update_elem(&Element::Ref).unwrap();
        tracker.update_elem(&Element::Hash(1)).unwrap();
        assert!(matches!(
            tracker.update_elem(&Element::Array(0)),
            Err(Error::DepthLimit(2))
        ));
    }

    #[test]
    fn end_reopens_room() {
        let mut tracker = DepthTracker::new(1);
        tracker.update_elem(&Element::Array(3)).unwrap();
        tracker.end();
        tracker.update_elem(&Element::Array(3)).unwrap();
        assert_eq!(tracker.depth(), 1);
    }
}
