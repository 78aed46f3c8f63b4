use crate::{BoardGrid, Cell, Outcome, PieceKind, BOARD_SIZE};

/// A board and a single piece relocation on it, without any captures.
#[derive(Clone, Debug)]
pub struct SimpleMoveInput {
    pub before: BoardGrid,
    pub piece: PieceKind,
    pub origin: Cell,
    pub destination: Cell,
}

impl SimpleMoveInput {
    pub fn after(&self) -> BoardGrid {
        self.before
            .with(self.origin, PieceKind::Empty)
            .with(self.destination, self.piece)
    }
}

impl quickcheck::Arbitrary for SimpleMoveInput {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let piece = *g.choose(&PieceKind::PIECES).unwrap();
        let origin = Cell::arbitrary(g);
        // The destination must differ from the origin
        let destination = loop {
            let c = Cell::arbitrary(g);
            if c != origin {
                break c;
            }
        };
        let before = BoardGrid::arbitrary(g)
            .with(origin, piece)
            .with(destination, PieceKind::Empty);
        SimpleMoveInput {
            before,
            piece,
            origin,
            destination,
        }
    }
}

/// A board and a single attacker or defender that is removed from it.
#[derive(Clone, Debug)]
pub struct CaptureInput {
    pub before: BoardGrid,
    pub piece: PieceKind,
    pub cell: Cell,
}

impl CaptureInput {
    pub fn after(&self) -> BoardGrid {
        self.before.with(self.cell, PieceKind::Empty)
    }
}

impl quickcheck::Arbitrary for CaptureInput {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let piece = *g
            .choose(&[PieceKind::Attacker, PieceKind::Defender])
            .unwrap();
        let cell = Cell::arbitrary(g);
        CaptureInput {
            before: BoardGrid::arbitrary(g).with(cell, piece),
            piece,
            cell,
        }
    }
}

impl quickcheck::Arbitrary for PieceKind {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[
            PieceKind::Empty,
            PieceKind::Attacker,
            PieceKind::Defender,
            PieceKind::King,
        ])
        .unwrap()
    }
}

impl quickcheck::Arbitrary for Outcome {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[
            Outcome::Attacker,
            Outcome::Defender,
            Outcome::Draw,
            Outcome::Unknown,
        ])
        .unwrap()
    }
}

impl quickcheck::Arbitrary for Cell {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Cell::new(
            u8::arbitrary(g) % BOARD_SIZE as u8,
            u8::arbitrary(g) % BOARD_SIZE as u8,
        )
    }
}

impl quickcheck::Arbitrary for BoardGrid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Mostly empty cells, like a real board in the middle of a game
        BoardGrid::from_pieces(Cell::all().map(|cell| {
            let kind = if u8::arbitrary(g) % 3 == 0 {
                PieceKind::arbitrary(g)
            } else {
                PieceKind::Empty
            };
            (cell, kind)
        }))
    }
}
