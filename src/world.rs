//! Bit-packed world storage.
//!
//! A [`Block`] is 8 cells packed into a byte, a [`Chunk`] is 8 blocks packed into a `u64`.
//! Block `i` of a chunk occupies bits `[8i, 8i + 8)`, cell `j` of a block is bit `j`.

/// number of cells in a single block
pub const CELLS_PER_BLOCK: u32 = 8;
/// number of blocks in a single chunk
pub const BLOCKS_PER_CHUNK: u32 = 8;
/// number of cells in a single chunk
pub const CELLS_PER_CHUNK: u32 = CELLS_PER_BLOCK * BLOCKS_PER_CHUNK;

/// Returns the state of cell `index` in a packed chunk value.
#[inline]
pub fn get_cell(value: u64, index: u32) -> bool {
    assert!(index < CELLS_PER_CHUNK, "cell index {index} out of range");
    (value >> index) & 1 == 1
}

/// Packs 8 cells into a block value, cell 0 being the least significant bit.
#[inline]
pub fn pack_block(cells: [bool; CELLS_PER_BLOCK as usize]) -> u8 {
    cells
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &alive)| acc | ((alive as u8) << i))
}

/// Packs 8 block values into a chunk value, block 0 being the least significant byte.
#[inline]
pub fn pack_chunk(blocks: [u8; BLOCKS_PER_CHUNK as usize]) -> u64 {
    blocks
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &block)| {
            acc | ((block as u64) << (i as u32 * CELLS_PER_BLOCK))
        })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block(pub u8);

impl Block {
    #[inline]
    pub fn cell(self, index: u32) -> bool {
        assert!(index < CELLS_PER_BLOCK, "cell index {index} out of range");
        get_cell(self.0 as u64, index)
    }

    #[inline]
    pub fn set_cell(&mut self, index: u32, alive: bool) {
        assert!(index < CELLS_PER_BLOCK, "cell index {index} out of range");
        if alive {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// unpacked view of the block, left to right
    pub fn cells(self) -> [bool; CELLS_PER_BLOCK as usize] {
        std::array::from_fn(|i| self.cell(i as u32))
    }

    pub fn from_cells(cells: [bool; CELLS_PER_BLOCK as usize]) -> Self {
        Self(pack_block(cells))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk(pub u64);

impl Chunk {
    pub const EMPTY: Chunk = Chunk(0);

    #[inline]
    pub fn cell(self, index: u32) -> bool {
        get_cell(self.0, index)
    }

    /// Cell at column `x` of block (row) `y`.
    #[inline]
    pub fn cell_at(self, x: u32, y: u32) -> bool {
        assert!(x < CELLS_PER_BLOCK && y < BLOCKS_PER_CHUNK, "({x}, {y}) out of range");
        self.cell(y * CELLS_PER_BLOCK + x)
    }

    #[inline]
    pub fn block(self, index: u32) -> Block {
        assert!(index < BLOCKS_PER_CHUNK, "block index {index} out of range");
        Block((self.0 >> (index * CELLS_PER_BLOCK)) as u8)
    }

    pub fn set_block(&mut self, index: u32, block: Block) {
        assert!(index < BLOCKS_PER_CHUNK, "block index {index} out of range");
        let shift = index * CELLS_PER_BLOCK;
        self.0 = (self.0 & !(0xFF << shift)) | ((block.0 as u64) << shift);
    }

    pub fn blocks(self) -> [Block; BLOCKS_PER_CHUNK as usize] {
        std::array::from_fn(|i| self.block(i as u32))
    }

    pub fn from_blocks(blocks: [Block; BLOCKS_PER_CHUNK as usize]) -> Self {
        Self(pack_chunk(blocks.map(|b| b.0)))
    }

    /// ORs an independently drawn random byte into every block.
    pub fn fill_random(&mut self, rng: &mut fastrand::Rng) {
        for block in 0..BLOCKS_PER_CHUNK {
            self.0 |= (rng.u8(..) as u64) << (block * CELLS_PER_BLOCK);
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// number of live cells
    #[inline]
    pub fn population(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over `(index, alive)` for all 64 cells.
    pub fn cells(self) -> impl Iterator<Item = (u32, bool)> {
        (0..CELLS_PER_CHUNK).map(move |i| (i, self.cell(i)))
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn block_works() {
        let block = Block(0b1000_0101);
        assert_eq!(
            [true, false, true, false, false, false, false, true],
            block.cells()
        );
        assert_eq!(block, Block::from_cells(block.cells()));

        let mut block = Block::default();
        block.set_cell(7, true);
        block.set_cell(0, true);
        block.set_cell(0, false);
        assert_eq!(Block(0x80), block);
    }

    #[test]
    fn chunk_blocks_are_bytes() {
        let chunk = Chunk(0x0807_0605_0403_0201);
        for (i, block) in chunk.blocks().iter().enumerate() {
            assert_eq!(i as u8 + 1, block.0);
        }

        let mut chunk = chunk;
        chunk.set_block(7, Block(0xFF));
        assert_eq!(Chunk(0xFF07_0605_0403_0201), chunk);
        assert!(chunk.cell_at(7, 7));
        assert!(chunk.cell_at(0, 0));
        assert!(!chunk.cell_at(1, 0));
    }

    #[test]
    fn fill_random_ors_into_value() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut chunk = Chunk(u64::MAX);
        chunk.fill_random(&mut rng);
        assert_eq!(Chunk(u64::MAX), chunk);

        // same seed, same chunk
        let (mut a, mut b) = (Chunk::EMPTY, Chunk::EMPTY);
        a.fill_random(&mut fastrand::Rng::with_seed(42));
        b.fill_random(&mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);

        a.clear();
        assert_eq!(Chunk::EMPTY, a);
        assert_eq!(0, a.population());
    }

    #[test]
    fn accessor_is_deterministic_after_fill() {
        let mut chunk = Chunk::EMPTY;
        chunk.fill_random(&mut fastrand::Rng::with_seed(1234));
        let first: Vec<_> = chunk.cells().collect();
        let second: Vec<_> = chunk.cells().collect();
        assert_eq!(first, second);
        assert_eq!(
            chunk.population() as usize,
            first.iter().filter(|(_, alive)| *alive).count()
        );
    }

    #[test]
    #[should_panic]
    fn cell_index_out_of_range() {
        get_cell(0, 64);
    }

    proptest! {
        #[test]
        fn get_cell_matches_binary_repr(v in any::<u64>(), i in 0u32..64) {
            let repr = format!("{v:064b}");
            let bit = repr.as_bytes()[63 - i as usize] == b'1';
            prop_assert_eq!(bit, get_cell(v, i));
        }

        #[test]
        fn unpack_then_pack_is_identity(v in any::<u64>()) {
            let blocks: [u8; 8] = std::array::from_fn(|b| {
                let cells: [bool; 8] = std::array::from_fn(|c| get_cell(v, (b * 8 + c) as u32));
                pack_block(cells)
            });
            prop_assert_eq!(v, pack_chunk(blocks));

            let chunk = Chunk(v);
            prop_assert_eq!(chunk, Chunk::from_blocks(chunk.blocks()));
        }
    }
}
