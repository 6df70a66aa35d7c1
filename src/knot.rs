// Day 10's knot hash, reused by day 14 to fill the defragmenter grid.

pub const KEY_SUFFIX: [u8; 5] = [17, 31, 73, 47, 23];
pub const ROUNDS: usize = 64;

pub struct Knots {
    marks: Vec<u8>,
    pos: usize,
    skip: usize,
}

impl Knots {
    pub fn new(size: usize) -> Knots {
        assert!(size <= 256, "marks must fit in a byte");
        Knots {marks: (0 .. size).map(|n| n as u8).collect(), pos: 0, skip: 0}
    }

    pub fn marks(&self) -> &[u8] {&self.marks}

    pub fn pos(&self) -> usize {self.pos}

    pub fn skip(&self) -> usize {self.skip}

    /// Product of the first two marks, the day 10 part 1 checksum.
    pub fn proof(&self) -> u32 {self.marks[0] as u32 * self.marks[1] as u32}

    /// Reverses `len` marks starting at the current position, wrapping past
    /// the end of the ring, then advances the position by `len` plus the
    /// current skip. `len` must not exceed the ring size.
    pub fn twist(&mut self, len: usize) -> &mut Knots {
        let size = self.marks.len();
        for n in 0 .. len / 2 {
            self.marks.swap((self.pos + n) % size, (self.pos + len - 1 - n) % size);
        }
        self.pos = (self.pos + len + self.skip) % size;
        self.skip += 1;
        self
    }
}

/// 64 rounds of twists keyed by the input bytes plus the standard suffix,
/// XOR-folded down to 16 bytes. The fold runs over the backing array as
/// stored; the ring position only frames future twists.
pub fn digest(input: &str) -> [u8; 16] {
    let key = input.bytes().chain(KEY_SUFFIX).collect::<Vec<_>>();
    let mut knots = Knots::new(256);
    for _ in 0 .. ROUNDS {
        for &len in &key {knots.twist(len as usize);}
    }

    let mut folded = [0; 16];
    for (block, chunk) in knots.marks.chunks(16).enumerate() {
        folded[block] = chunk.iter().fold(0, |digest, &mark| digest ^ mark);
    }
    folded
}

pub fn hex_digest(input: &str) -> String {
    digest(input).iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ring_is_identity() {
        let knots = Knots::new(5);
        assert_eq!(knots.marks(), [0, 1, 2, 3, 4]);
        assert_eq!(knots.pos(), 0);
        assert_eq!(knots.skip(), 0);
    }

    #[test]
    fn single_twists() {
        for (len, marks, pos) in [
            (1, [0, 1, 2, 3, 4], 1),
            (2, [1, 0, 2, 3, 4], 2),
            (3, [2, 1, 0, 3, 4], 3),
            (4, [3, 2, 1, 0, 4], 4),
            (5, [4, 3, 2, 1, 0], 0),
        ] {
            let mut knots = Knots::new(5);
            assert_eq!(knots.twist(len).marks(), marks, "twist {}", len);
            assert_eq!(knots.pos(), pos, "twist {}", len);
            assert_eq!(knots.skip(), 1, "twist {}", len);
        }
    }

    #[test]
    fn twist_sequence() {
        let mut knots = Knots::new(5);
        knots.twist(3).twist(4);
        assert_eq!(knots.marks(), [4, 3, 0, 1, 2]);
        assert_eq!((knots.pos(), knots.skip()), (3, 2));

        knots.twist(1);
        assert_eq!(knots.marks(), [4, 3, 0, 1, 2]);
        assert_eq!((knots.pos(), knots.skip()), (1, 3));

        knots.twist(5);
        assert_eq!(knots.marks(), [3, 4, 2, 1, 0]);
        assert_eq!((knots.pos(), knots.skip()), (4, 4));
        assert_eq!(knots.proof(), 12);
    }

    #[test]
    fn zero_length_twist_only_advances_skip() {
        let mut knots = Knots::new(5);
        knots.twist(0);
        assert_eq!(knots.marks(), [0, 1, 2, 3, 4]);
        assert_eq!((knots.pos(), knots.skip()), (0, 1));

        // the second zero twist moves by the skip accumulated so far
        knots.twist(0);
        assert_eq!(knots.marks(), [0, 1, 2, 3, 4]);
        assert_eq!((knots.pos(), knots.skip()), (1, 2));
    }

    #[test]
    fn twists_permute_the_ring() {
        let mut knots = Knots::new(256);
        for len in [183, 0, 31, 146, 254, 240, 223, 150, 2, 206, 161, 1, 255, 232, 199, 88] {
            knots.twist(len);
        }
        let mut sorted = knots.marks().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0 ..= 255).collect::<Vec<u8>>());
        assert_eq!(knots.proof(), 15990);
    }

    #[test]
    fn digest_vectors() {
        assert_eq!(hex_digest(""), "a2582a3a0e66e6e86e3812dcb672a272");
        assert_eq!(hex_digest("1,2,3"), "3efbe78a8d82f29979031a4aa0b16a9d");
        assert_eq!(hex_digest("1,2,4"), "63960835bcdc130f0b66d7ff4f6a5a8e");
        assert_eq!(hex_digest("AoC 2017"), "33efeb34ea91902bb2f59c9920caa6cd");
        assert_eq!(
            hex_digest("183,0,31,146,254,240,223,150,2,206,161,1,255,232,199,88"),
            "90adb097dd55dea8305c900372258ac6"
        );
    }

    #[test]
    fn digest_shape_and_determinism() {
        let hex = hex_digest("flqrgnkx-0");
        assert_eq!(hex.len(), 32);
        assert!(hex.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(digest("flqrgnkx-0"), digest("flqrgnkx-0"));
    }
}
