use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of every generated coordinate.
pub const COORD_MAX: u32 = 1_000_000;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl BoundingBox {
    /// Draws a box with `x_min < x_max` and `y_min <= y_max`, all in `[0, COORD_MAX]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> BoundingBox {
        let x_min = rng.gen_range(0..COORD_MAX);
        let x_max = rng.gen_range(x_min + 1..=COORD_MAX);

        let y_min = rng.gen_range(0..COORD_MAX);
        let y_max = rng.gen_range(y_min..=COORD_MAX);

        BoundingBox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.x_min < self.x_max
            && self.y_min <= self.y_max
            && self.x_max <= COORD_MAX
            && self.y_max <= COORD_MAX
    }

    /// Zero for inverted boxes.
    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    pub fn width(&self) -> u64 {
        self.x_max.saturating_sub(self.x_min) as u64
    }

    pub fn height(&self) -> u64 {
        self.y_max.saturating_sub(self.y_min) as u64
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Closed-interval overlap, so touching edges count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }
}

/// One CSV line: `index,x_min,y_min,x_max,y_max`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBoxRow {
    pub index: u64,
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl BoundingBoxRow {
    pub fn new(index: u64, bbox: BoundingBox) -> BoundingBoxRow {
        BoundingBoxRow {
            index,
            x_min: bbox.x_min,
            y_min: bbox.y_min,
            x_max: bbox.x_max,
            y_max: bbox.y_max,
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min,
            y_min: self.y_min,
            x_max: self.x_max,
            y_max: self.y_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_boxes_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100_000 {
            let b = BoundingBox::random(&mut rng);
            assert!(b.x_min < b.x_max, "{b:?}");
            assert!(b.y_min <= b.y_max, "{b:?}");
            assert!(b.x_max <= COORD_MAX);
            assert!(b.y_max <= COORD_MAX);
            assert!(b.is_valid());
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            assert_eq!(BoundingBox::random(&mut a), BoundingBox::random(&mut b));
        }
    }

    #[test]
    fn validity_checks() {
        let ok = BoundingBox {
            x_min: 0,
            y_min: 5,
            x_max: 1,
            y_max: 5,
        };
        assert!(ok.is_valid());
        assert_eq!(ok.area(), 0);

        let flat_x = BoundingBox { x_max: 0, ..ok };
        assert!(!flat_x.is_valid());

        let too_wide = BoundingBox {
            x_max: COORD_MAX + 1,
            ..ok
        };
        assert!(!too_wide.is_valid());
    }

    #[test]
    fn inverted_box_has_zero_area() {
        let inverted = BoundingBox {
            x_min: 10,
            y_min: 10,
            x_max: 2,
            y_max: 30,
        };
        assert_eq!(inverted.width(), 0);
        assert_eq!(inverted.height(), 20);
        assert_eq!(inverted.area(), 0);

        let full = BoundingBox {
            x_min: 0,
            y_min: 0,
            x_max: COORD_MAX,
            y_max: COORD_MAX,
        };
        assert_eq!(full.area(), 1_000_000_000_000);
    }

    #[test]
    fn union_and_intersection() {
        let a = BoundingBox {
            x_min: 0,
            y_min: 0,
            x_max: 2,
            y_max: 2,
        };
        let b = BoundingBox {
            x_min: 2,
            y_min: 5,
            x_max: 7,
            y_max: 7,
        };
        let c = BoundingBox {
            x_min: 3,
            y_min: 0,
            x_max: 4,
            y_max: 1,
        };

        assert_eq!(
            a.union(&b),
            BoundingBox {
                x_min: 0,
                y_min: 0,
                x_max: 7,
                y_max: 7,
            }
        );
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.union(&b).intersects(&c));

        let touching = BoundingBox { x_min: 2, ..c };
        assert!(a.intersects(&touching));
    }

    #[test]
    fn row_keeps_coordinates() {
        let b = BoundingBox {
            x_min: 1,
            y_min: 2,
            x_max: 3,
            y_max: 4,
        };
        let row = BoundingBoxRow::new(9, b);
        assert_eq!(row.index, 9);
        assert_eq!(row.bbox(), b);
    }
}
