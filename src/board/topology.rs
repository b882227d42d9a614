//! Board topology: per-seat paths, safe cells, inner-path threshold.
//!
//! The standard board is a cross with four three-column arms around a
//! centre home cell. Each seat enters in the middle column of its own arm,
//! runs the outer ring clockwise past the four corner junctions, returns
//! to the tip of its own arm and walks the middle column back inwards to
//! the centre. Paths therefore share every ring cell, and each path visits
//! its own middle column twice (once on entry, once on the home stretch).
//!
//! The topology is pure data: fixed at construction, never mutated.

use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap, Position, BASE};

/// Identifier of a board cell, shared by every path that crosses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CellId(&'static str);

impl CellId {
    /// Create a cell ID from its name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The cell name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// The shared terminal cell of every path.
pub const HOME: CellId = CellId::new("center-home");

/// Cells past `path_len - INNER_PATH_SPAN` are gated behind a first cut.
pub const INNER_PATH_SPAN: Position = 7;

/// Transit script for one move. A roll moves at most 12 cells.
pub type Transit = SmallVec<[CellId; 12]>;

const P1_PATH: [&str; 68] = [
    "c-9-1", "c-10-1", "c-11-1", "c-12-1", "c-13-1", "c-14-1",
    "c-14-2", "c-13-2", "c-12-2", "c-11-2", "c-10-2", "c-9-2",
    "tab-bl",
    "c-8-5", "c-8-4", "c-8-3", "c-8-2", "c-8-1", "c-8-0",
    "c-7-0",
    "c-6-0", "c-6-1", "c-6-2", "c-6-3", "c-6-4", "c-6-5",
    "tab-tl",
    "c-5-2", "c-4-2", "c-3-2", "c-2-2", "c-1-2", "c-0-2",
    "c-0-1",
    "c-0-0", "c-1-0", "c-2-0", "c-3-0", "c-4-0", "c-5-0",
    "tab-tr",
    "c-6-9", "c-6-10", "c-6-11", "c-6-12", "c-6-13", "c-6-14",
    "c-7-14",
    "c-8-14", "c-8-13", "c-8-12", "c-8-11", "c-8-10", "c-8-9",
    "tab-br",
    "c-9-0", "c-10-0", "c-11-0", "c-12-0", "c-13-0", "c-14-0",
    "c-14-1", "c-13-1", "c-12-1", "c-11-1", "c-10-1", "c-9-1",
    "center-home",
];

const P2_PATH: [&str; 68] = [
    "c-7-5", "c-7-4", "c-7-3", "c-7-2", "c-7-1", "c-7-0",
    "c-6-0", "c-6-1", "c-6-2", "c-6-3", "c-6-4", "c-6-5",
    "tab-tl",
    "c-5-2", "c-4-2", "c-3-2", "c-2-2", "c-1-2", "c-0-2",
    "c-0-1",
    "c-0-0", "c-1-0", "c-2-0", "c-3-0", "c-4-0", "c-5-0",
    "tab-tr",
    "c-6-9", "c-6-10", "c-6-11", "c-6-12", "c-6-13", "c-6-14",
    "c-7-14",
    "c-8-14", "c-8-13", "c-8-12", "c-8-11", "c-8-10", "c-8-9",
    "tab-br",
    "c-9-0", "c-10-0", "c-11-0", "c-12-0", "c-13-0", "c-14-0",
    "c-14-1",
    "c-14-2", "c-13-2", "c-12-2", "c-11-2", "c-10-2", "c-9-2",
    "tab-bl",
    "c-8-5", "c-8-4", "c-8-3", "c-8-2", "c-8-1", "c-8-0",
    "c-7-0", "c-7-1", "c-7-2", "c-7-3", "c-7-4", "c-7-5",
    "center-home",
];

const P3_PATH: [&str; 68] = [
    "c-5-1", "c-4-1", "c-3-1", "c-2-1", "c-1-1", "c-0-1",
    "c-0-0", "c-1-0", "c-2-0", "c-3-0", "c-4-0", "c-5-0",
    "tab-tr",
    "c-6-9", "c-6-10", "c-6-11", "c-6-12", "c-6-13", "c-6-14",
    "c-7-14",
    "c-8-14", "c-8-13", "c-8-12", "c-8-11", "c-8-10", "c-8-9",
    "tab-br",
    "c-9-0", "c-10-0", "c-11-0", "c-12-0", "c-13-0", "c-14-0",
    "c-14-1",
    "c-14-2", "c-13-2", "c-12-2", "c-11-2", "c-10-2", "c-9-2",
    "tab-bl",
    "c-8-5", "c-8-4", "c-8-3", "c-8-2", "c-8-1", "c-8-0",
    "c-7-0",
    "c-6-0", "c-6-1", "c-6-2", "c-6-3", "c-6-4", "c-6-5",
    "tab-tl",
    "c-5-2", "c-4-2", "c-3-2", "c-2-2", "c-1-2", "c-0-2",
    "c-0-1", "c-1-1", "c-2-1", "c-3-1", "c-4-1", "c-5-1",
    "center-home",
];

const P4_PATH: [&str; 68] = [
    "c-7-9", "c-7-10", "c-7-11", "c-7-12", "c-7-13", "c-7-14",
    "c-8-14", "c-8-13", "c-8-12", "c-8-11", "c-8-10", "c-8-9",
    "tab-br",
    "c-9-0", "c-10-0", "c-11-0", "c-12-0", "c-13-0", "c-14-0",
    "c-14-1",
    "c-14-2", "c-13-2", "c-12-2", "c-11-2", "c-10-2", "c-9-2",
    "tab-bl",
    "c-8-5", "c-8-4", "c-8-3", "c-8-2", "c-8-1", "c-8-0",
    "c-7-0",
    "c-6-0", "c-6-1", "c-6-2", "c-6-3", "c-6-4", "c-6-5",
    "tab-tl",
    "c-5-2", "c-4-2", "c-3-2", "c-2-2", "c-1-2", "c-0-2",
    "c-0-1",
    "c-0-0", "c-1-0", "c-2-0", "c-3-0", "c-4-0", "c-5-0",
    "tab-tr",
    "c-6-9", "c-6-10", "c-6-11", "c-6-12", "c-6-13", "c-6-14",
    "c-7-14", "c-7-13", "c-7-12", "c-7-11", "c-7-10", "c-7-9",
    "center-home",
];

/// Corner junctions and arm tips.
const STANDARD_SAFE_CELLS: [&str; 8] = [
    "tab-tl", "tab-tr", "tab-bl", "tab-br",
    "c-0-1", "c-7-14", "c-14-1", "c-7-0",
];

/// Static board topology.
///
/// ## Example
///
/// ```
/// use thayam::board::{Board, HOME};
/// use thayam::core::PlayerId;
///
/// let board = Board::standard();
/// assert_eq!(board.path_len(PlayerId::P1), 68);
/// assert_eq!(board.inner_path_threshold(PlayerId::P1), 61);
/// assert_eq!(board.cell_at(PlayerId::P1, 68), Some(HOME));
/// assert!(board.is_safe_zone(board.cell_at(PlayerId::P1, 13).unwrap()));
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    paths: PlayerMap<Vec<CellId>>,
    safe: FxHashSet<CellId>,
}

impl Board {
    /// The standard four-arm board.
    #[must_use]
    pub fn standard() -> Self {
        let to_cells = |names: &[&'static str]| -> Vec<CellId> {
            names.iter().copied().map(CellId::new).collect()
        };
        let paths = PlayerMap::new(|player| match player {
            PlayerId::P1 => to_cells(&P1_PATH),
            PlayerId::P2 => to_cells(&P2_PATH),
            PlayerId::P3 => to_cells(&P3_PATH),
            _ => to_cells(&P4_PATH),
        });
        Self::from_paths(paths, STANDARD_SAFE_CELLS.iter().copied().map(CellId::new))
    }

    /// Build a board from explicit paths and a safe-cell set.
    ///
    /// Every path must end at [`HOME`] and be longer than the inner-path span.
    pub fn from_paths(
        paths: PlayerMap<Vec<CellId>>,
        safe: impl IntoIterator<Item = CellId>,
    ) -> Self {
        for (player, path) in paths.iter() {
            assert!(
                path.len() > INNER_PATH_SPAN as usize && path.len() <= Position::MAX as usize,
                "Path for {player} has invalid length {}",
                path.len()
            );
            assert_eq!(path.last(), Some(&HOME), "Path for {player} must end at home");
        }
        let safe = safe.into_iter().filter(|cell| *cell != HOME).collect();
        Self { paths, safe }
    }

    /// Replace the safe-cell set.
    #[must_use]
    pub fn with_safe_cells(mut self, safe: impl IntoIterator<Item = CellId>) -> Self {
        self.safe = safe.into_iter().filter(|cell| *cell != HOME).collect();
        self
    }

    /// The ordered path of a seat, entry cell first, home last.
    #[must_use]
    pub fn path_of(&self, player: PlayerId) -> &[CellId] {
        &self.paths[player]
    }

    /// Path length `L`; also the home position.
    #[must_use]
    pub fn path_len(&self, player: PlayerId) -> Position {
        self.paths[player].len() as Position
    }

    /// Cell at a 1-based position, `None` for base or past the end.
    #[must_use]
    pub fn cell_at(&self, player: PlayerId, position: Position) -> Option<CellId> {
        if position == BASE {
            return None;
        }
        self.paths[player].get(position as usize - 1).copied()
    }

    /// First position at which `cell` appears on a seat's path.
    #[must_use]
    pub fn position_of(&self, player: PlayerId, cell: CellId) -> Option<Position> {
        self.paths[player]
            .iter()
            .position(|c| *c == cell)
            .map(|i| (i + 1) as Position)
    }

    /// Static safe-zone predicate, independent of occupancy.
    #[must_use]
    pub fn is_safe_zone(&self, cell: CellId) -> bool {
        self.safe.contains(&cell)
    }

    /// Whether `cell` is the shared home cell.
    #[must_use]
    pub fn is_home(&self, cell: CellId) -> bool {
        cell == HOME
    }

    /// Whether a landing on `cell` can capture (neither safe nor home).
    #[must_use]
    pub fn is_exposed(&self, cell: CellId) -> bool {
        !self.is_home(cell) && !self.is_safe_zone(cell)
    }

    /// `L - 7`. Positions above it are the gated inner path plus home.
    #[must_use]
    pub fn inner_path_threshold(&self, player: PlayerId) -> Position {
        self.path_len(player) - INNER_PATH_SPAN
    }

    /// Whether `position` lies on the gated inner path (home included).
    #[must_use]
    pub fn is_inner(&self, player: PlayerId, position: Position) -> bool {
        position > self.inner_path_threshold(player)
    }

    /// Cells visited moving from `from` (exclusive) to `to` (inclusive).
    ///
    /// Entering from base visits only the entry cell.
    #[must_use]
    pub fn transit(&self, player: PlayerId, from: Position, to: Position) -> Transit {
        let path = &self.paths[player];
        if from == BASE {
            return path.iter().take(1).copied().collect();
        }
        path[from as usize..to as usize].iter().copied().collect()
    }

    /// Cells a captured token is dragged back through on its way to base:
    /// from the position before `from` down to the entry cell.
    #[must_use]
    pub fn retreat(&self, player: PlayerId, from: Position) -> Vec<CellId> {
        if from <= 1 {
            return Vec::new();
        }
        self.paths[player][..from as usize - 1].iter().rev().copied().collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
