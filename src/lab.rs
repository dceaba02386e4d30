use std::fmt::Display;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "^"),
            Direction::Right => write!(f, ">"),
            Direction::Down => write!(f, "v"),
            Direction::Left => write!(f, "<"),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '^' => Ok(Direction::Up),
            '>' => Ok(Direction::Right),
            'v' => Ok(Direction::Down),
            '<' => Ok(Direction::Left),
            other => Err(Error::InvalidCharForDirection(other)),
        }
    }
}

impl Direction {
    pub fn turn_right(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub r: usize,
    pub c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    /// The adjacent position along `dir`, `None` if it would leave the first row or column.
    pub fn along(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

/// Guard state, kept apart from the tiles of the laboratory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guard {
    pos: Position,
    dir: Direction,
}

impl Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dir, self.pos())
    }
}

impl Guard {
    pub fn new(pos: &Position, dir: Direction) -> Self {
        Self {
            pos: pos.clone(),
            dir,
        }
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn ahead_pos(&self) -> Option<Position> {
        self.pos.along(self.dir)
    }

    pub fn move_to(&mut self, pos: Position) {
        self.pos = pos;
    }

    pub fn turn_right(&mut self) {
        self.dir = self.dir.turn_right();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    Obstruction,
    Visited,
}

impl Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Floor => write!(f, "."),
            Tile::Wall => write!(f, "#"),
            Tile::Obstruction => write!(f, "O"),
            Tile::Visited => write!(f, "x"),
        }
    }
}

impl Tile {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Tile::Wall | Tile::Obstruction)
    }
}

#[derive(Debug, Clone)]
pub struct Laboratory {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
}

impl Display for Laboratory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.view(None))
    }
}

impl Laboratory {
    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    /// Renders the laboratory with the guard's glyph drawn over its tile.
    pub fn view<'a>(&'a self, guard: Option<&'a Guard>) -> LaboratoryView<'a> {
        LaboratoryView { lab: self, guard }
    }

    pub fn tile(&self, pos: &Position) -> Option<&Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    pub(crate) fn tile_mut(&mut self, pos: &Position) -> Option<&mut Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get_mut(ind))
    }

    /// All tiles with their positions, in row-major order.
    pub fn tile_iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(ind, tile)| (self.ind_to_pos(ind), *tile))
    }

    pub fn position_iter(&self, tile: Tile) -> impl Iterator<Item = Position> + '_ {
        self.tile_iter()
            .filter(move |(_, this_tile)| *this_tile == tile)
            .map(|(pos, _)| pos)
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }

    fn ind_to_pos(&self, ind: usize) -> Position {
        Position::new(ind / self.col_n, ind % self.col_n)
    }
}

pub struct LaboratoryView<'a> {
    lab: &'a Laboratory,
    guard: Option<&'a Guard>,
}

impl Display for LaboratoryView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pos, tile) in self.lab.tile_iter() {
            match self.guard {
                Some(guard) if *guard.pos() == pos => write!(f, "{}", guard.dir())?,
                _ => write!(f, "{}", tile)?,
            }

            if pos.c + 1 == self.lab.col_n {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

pub(crate) struct LaboratoryBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: Option<usize>,
    guard: Option<Guard>,
}

impl LaboratoryBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            guard: None,
        }
    }

    pub fn add_row(&mut self, row_text: &str) -> Result<(), Error> {
        let this_col_n = row_text.chars().count();
        let col_n = *self.col_n.get_or_insert(this_col_n);
        if col_n != this_col_n {
            return Err(Error::InconsistentRow(col_n, this_col_n));
        }

        for (ind, c) in row_text.chars().enumerate() {
            let tile = match c {
                '.' => Tile::Floor,
                '#' => Tile::Wall,
                other => {
                    let dir = Direction::try_from(other).map_err(|_| Error::InvalidChar(other))?;
                    let guard = Guard::new(&Position::new(self.row_n, ind), dir);
                    if let Some(first_guard) = self.guard.take() {
                        return Err(Error::MultipleGuards(first_guard, guard));
                    }

                    self.guard = Some(guard);
                    Tile::Floor
                }
            };
            self.tiles.push(tile);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> (Laboratory, Option<Guard>) {
        (
            Laboratory {
                tiles: self.tiles,
                row_n: self.row_n,
                col_n: self.col_n.unwrap_or(0),
            },
            self.guard,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_lab;

    #[test]
    fn turn_right_four_times_is_identity() {
        for dir in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            let mut turned = dir;
            for _ in 0..4 {
                turned = turned.turn_right();
            }
            assert_eq!(turned, dir);
        }
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
    }

    #[test]
    fn direction_rejects_unknown_glyph() {
        assert_eq!(Direction::try_from('v').unwrap(), Direction::Down);
        assert!(matches!(
            Direction::try_from('x'),
            Err(Error::InvalidCharForDirection('x'))
        ));
    }

    #[test]
    fn locate_guard_and_keep_its_tile_empty() {
        let (lab, guard) = parse_lab("#..\n.>.\n...").unwrap();
        let guard = guard.unwrap();
        assert_eq!(*guard.pos(), Position::new(1, 1));
        assert_eq!(guard.dir(), Direction::Right);
        assert_eq!(lab.tile(guard.pos()), Some(&Tile::Floor));
        assert_eq!((lab.row_n(), lab.col_n()), (3, 3));
        assert_eq!(lab.to_string(), "#..\n...\n...\n");
        assert_eq!(lab.view(Some(&guard)).to_string(), "#..\n.>.\n...\n");
    }

    #[test]
    fn map_without_guard_is_not_an_error() {
        let (lab, guard) = parse_lab("..#\n...").unwrap();
        assert!(guard.is_none());
        assert_eq!(lab.position_iter(Tile::Wall).collect::<Vec<_>>(), [Position::new(0, 2)]);
    }

    #[test]
    fn reject_malformed_layout() {
        assert!(matches!(
            parse_lab("...\n..\n^.."),
            Err(Error::InconsistentRow(3, 2))
        ));
        assert!(matches!(parse_lab("..a\n^.."), Err(Error::InvalidChar('a'))));
        match parse_lab(".^.\n..<") {
            Err(Error::MultipleGuards(first, second)) => {
                assert_eq!(*first.pos(), Position::new(0, 1));
                assert_eq!(*second.pos(), Position::new(1, 2));
            }
            other => panic!("Expect multiple guards error, given {:?}.", other),
        }
    }

    #[test]
    fn along_stops_at_first_row_and_column() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.along(Direction::Up), None);
        assert_eq!(origin.along(Direction::Left), None);
        assert_eq!(origin.along(Direction::Down), Some(Position::new(1, 0)));
        assert_eq!(origin.along(Direction::Right), Some(Position::new(0, 1)));
    }
}
