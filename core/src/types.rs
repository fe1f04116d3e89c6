use ndarray::Array2;

/// Single coordinate axis, used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type Cells = u16;

/// Board position `(x, y)` where `x` is the column and `y` the row.
pub type Pos = (Coord, Coord);

pub trait ToGridIndex {
    type Output;
    fn to_grid_index(self) -> Self::Output;
}

impl ToGridIndex for Pos {
    type Output = [usize; 2];

    fn to_grid_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(w: Coord, h: Coord) -> Cells {
    let w = w as Cells;
    let h = h as Cells;
    w.saturating_mul(h)
}

pub trait NeighborsExt {
    fn neighbors(&self, pos: Pos) -> Neighbors;
}

impl<T> NeighborsExt for Array2<T> {
    fn neighbors(&self, pos: Pos) -> Neighbors {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        Neighbors::new(pos, bounds)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: Pos) -> Option<Pos> {
    let (x, y) = pos;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterator over the up-to-8 in-bounds neighbors of a cell.
#[derive(Debug)]
pub struct Neighbors {
    center: Pos,
    bounds: Pos,
    index: u8,
}

impl Neighbors {
    fn new(center: Pos, bounds: Pos) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
