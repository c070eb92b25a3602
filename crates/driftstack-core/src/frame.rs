use ndarray::Array2;

/// A single 2-D image frame.
/// Pixel data is f32, row-major, shape = (height, width).
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Translation in pixels, row-major (Y then X) convention.
///
/// Used in two flavors: incremental (frame i relative to frame i-1) and
/// absolute (frame i relative to frame 0). Absolute shifts are the running
/// sum of incremental shifts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shift {
    pub row: f64,
    pub col: f64,
}

impl Shift {
    pub const ZERO: Shift = Shift { row: 0.0, col: 0.0 };

    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    pub fn is_finite(&self) -> bool {
        self.row.is_finite() && self.col.is_finite()
    }
}

impl std::ops::Add for Shift {
    type Output = Shift;

    fn add(self, rhs: Shift) -> Shift {
        Shift {
            row: self.row + rhs.row,
            col: self.col + rhs.col,
        }
    }
}

impl std::ops::Neg for Shift {
    type Output = Shift;

    fn neg(self) -> Shift {
        Shift {
            row: -self.row,
            col: -self.col,
        }
    }
}

/// Absolute shifts for a whole stack, index-aligned with the frames.
/// Entry 0 is always `Shift::ZERO`.
pub type ShiftTable = Vec<Shift>;
