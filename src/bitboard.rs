//! A fixed-size cell set using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. Cells of an
//! `N×N` grid are packed row-major into an unsigned integer `T`, so cell
//! `(x, y)` lives at bit `y * N + x`.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Coord;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Column or row index is out of bounds [0..N).
    IndexOutOfBounds { x: usize, y: usize },
}

impl core::fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// A fixed-size N×N bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of usable bits in the board (`N * N`).
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    /// Create a new empty bitboard.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Board with every cell set.
    #[inline]
    pub fn full() -> Self {
        BitBoard { bits: Self::mask() }
    }

    /// Cells whose `x + y` is even.
    pub fn checkerboard() -> Self {
        let mut board = Self::new();
        for y in 0..N {
            for x in (y % 2..N).step_by(2) {
                board.bits = board.bits | (T::one() << (y * N + x));
            }
        }
        board
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Gets the cell at `c`.
    pub fn get(&self, c: Coord) -> Result<bool, BitBoardError> {
        let idx = Self::index(c)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Like [`get`](Self::get), but out-of-bounds cells read as unset.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.get(c).unwrap_or(false)
    }

    /// Sets the cell at `c`.
    pub fn set(&mut self, c: Coord) -> Result<(), BitBoardError> {
        let idx = Self::index(c)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clears the cell at `c`.
    pub fn clear(&mut self, c: Coord) -> Result<(), BitBoardError> {
        let idx = Self::index(c)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Clears all cells.
    #[inline]
    pub fn clear_all(&mut self) {
        self.bits = T::zero();
    }

    #[inline]
    fn index(c: Coord) -> Result<usize, BitBoardError> {
        if c.x >= N || c.y >= N {
            Err(BitBoardError::IndexOutOfBounds { x: c.x, y: c.y })
        } else {
            Ok(c.y * N + c.x)
        }
    }

    /// Creates a bitboard from an iterator over cells.
    pub fn from_coords<I>(iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut board = Self::new();
        for c in iter {
            board.set(c)?;
        }
        Ok(board)
    }

    /// Iterator over the set cells in row-major order.
    #[inline]
    pub fn iter(&self) -> SetCells<T, N> {
        SetCells {
            bits: self.bits,
            idx: 0,
        }
    }

    /// The `k`-th set cell in row-major order.
    pub fn nth(&self, k: usize) -> Option<Coord> {
        self.iter().nth(k)
    }

    /// Every set cell grown by one cell in all eight directions, clipped to
    /// the grid. The result includes the set cells themselves.
    pub fn halo(&self) -> Self {
        let mut grown = *self;
        for c in self.iter() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (Some(x), Some(y)) =
                        (c.x.checked_add_signed(dx), c.y.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if x < N && y < N {
                        grown.bits = grown.bits | (T::one() << (y * N + x));
                    }
                }
            }
        }
        grown
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

impl<T, const N: usize> fmt::Display for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let bit = if ((self.bits >> (y * N + x)) & T::one()) != T::zero() {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if y + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetCells<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    idx: usize,
}

impl<T, const N: usize> Iterator for SetCells<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some(Coord::new(idx % N, idx / N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Complement within the board bounds.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(),
        }
    }
}

impl<T, const N: usize> BitAndAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits = self.bits & rhs.bits;
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}
