#![forbid(unsafe_code)]
//! QR code encoding.
//!
//! Encodes text into a QR Code Model 2 symbol (versions 1–40) at a caller-chosen error
//! correction level. The text is packed into a single numeric, alphanumeric or byte segment,
//! whichever is most compact, and the smallest version that holds it is selected. The mask
//! pattern is chosen automatically by penalty score.
//!
//! ```rust
//! use qrstudio::qrcode::{QrCode, QrCodeEcc};
//!
//! let qr = QrCode::encode_text("Hello, world!", QrCodeEcc::Medium).unwrap();
//! assert_eq!(qr.version().value(), 1);
//! assert_eq!(qr.size(), 21);
//! ```

use crate::error::DataTooLong;

/// A QR code symbol: an immutable square grid of dark and light modules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    size: i32,
    ecl: QrCodeEcc,
    mask: Mask,
    // Row-major, `true` is dark.
    modules: Vec<bool>,
    // Marks modules that belong to function patterns. Only used while building.
    function: Vec<bool>,
}

impl QrCode {
    /// Encodes `text` at exactly the given error correction level.
    ///
    /// Returns [`DataTooLong`] if the text does not fit in a version 40 symbol.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self, DataTooLong> {
        let segment = QrSegment::for_text(text);
        Self::encode_segment(&segment, ecl, Version::MIN, Version::MAX)
    }

    /// Encodes one segment using the smallest version in `minversion..=maxversion` that fits.
    pub fn encode_segment(
        segment: &QrSegment,
        ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
    ) -> Result<Self, DataTooLong> {
        let mut version = minversion;
        let used_bits = loop {
            let capacity = Self::num_data_codewords(version, ecl) * 8;
            match segment.total_bits(version) {
                Some(bits) if bits <= capacity => break bits,
                used if version >= maxversion => {
                    return Err(match used {
                        None => DataTooLong::SegmentTooLong,
                        Some(bits) => DataTooLong::DataOverCapacity { bits, capacity },
                    });
                }
                _ => version = Version::new(version.value() + 1),
            }
        };

        let capacity = Self::num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::default();
        bb.append_bits(segment.mode.mode_bits(), 4);
        // total_bits() already checked the count against the field width
        bb.append_bits(segment.numchars as u32, segment.mode.num_char_count_bits(version));
        bb.0.extend_from_slice(&segment.data.0);
        debug_assert_eq!(bb.len(), used_bits);

        // Terminator, then pad to a byte boundary, then alternate pad bytes up to capacity.
        let terminator = (capacity - bb.len()).min(4);
        bb.append_bits(0, terminator as u8);
        let boundary = bb.len().wrapping_neg() & 7;
        bb.append_bits(0, boundary as u8);
        for &pad in [0xEC, 0x11].iter().cycle() {
            if bb.len() >= capacity {
                break;
            }
            bb.append_bits(pad, 8);
        }

        Ok(Self::from_codewords(version, ecl, &bb.to_bytes()))
    }

    fn from_codewords(version: Version, ecl: QrCodeEcc, data: &[u8]) -> Self {
        let size = i32::from(version.value()) * 4 + 17;
        let area = (size * size) as usize;
        let mut qr = Self {
            version,
            size,
            ecl,
            mask: Mask::new(0),
            modules: vec![false; area],
            function: vec![false; area],
        };
        qr.draw_function_patterns();
        let codewords = qr.add_ecc_and_interleave(data);
        qr.draw_codewords(&codewords);

        let mut best = Mask::new(0);
        let mut min_penalty = i32::MAX;
        for candidate in (0u8..8).map(Mask::new) {
            qr.apply_mask(candidate);
            qr.draw_format_bits(candidate);
            let penalty = qr.penalty_score();
            if penalty < min_penalty {
                best = candidate;
                min_penalty = penalty;
            }
            // XOR again to undo
            qr.apply_mask(candidate);
        }
        qr.apply_mask(best);
        qr.draw_format_bits(best);
        qr.mask = best;
        qr.function = Vec::new();
        qr
    }

    /// The version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Width and height in modules, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns `true` for a dark module. Coordinates outside the symbol are light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size;
        range.contains(&x) && range.contains(&y) && self.modules[self.index(x, y)]
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.size + x) as usize
    }

    fn set_function_module(&mut self, x: i32, y: i32, dark: bool) {
        let i = self.index(x, y);
        self.modules[i] = dark;
        self.function[i] = true;
    }

    fn draw_function_patterns(&mut self) {
        let size = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        let positions = self.alignment_pattern_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &x) in positions.iter().enumerate() {
            for (j, &y) in positions.iter().enumerate() {
                // The three corners are taken by finder patterns.
                let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !corner {
                    self.draw_alignment_pattern(x, y);
                }
            }
        }

        // Reserve the format area; the real bits are drawn once the mask is known.
        self.draw_format_bits(Mask::new(0));
        self.draw_version();
    }

    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        let range = 0..self.size;
        for dy in -4..=4 {
            for dx in -4..=4 {
                let (xx, yy) = (x + dx, y + dy);
                if range.contains(&xx) && range.contains(&yy) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    fn draw_format_bits(&mut self, mask: Mask) {
        let bits: u32 = {
            let data = u32::from((self.ecl.format_bits() << 3) | mask.value());
            let mut rem = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            ((data << 10) | rem) ^ 0x5412
        };

        // Around the top-left finder
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        // Split between the other two finders
        let size = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        let ver = u32::from(self.version.value());
        if ver < 7 {
            return;
        }
        let bits: u32 = {
            let mut rem = ver;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
            }
            (ver << 12) | rem
        };
        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    /// Splits the data into blocks, appends Reed-Solomon ECC to each and interleaves them.
    fn add_ecc_and_interleave(&self, data: &[u8]) -> Vec<u8> {
        let (ver, ecl) = (self.version, self.ecl);
        assert_eq!(data.len(), Self::num_data_codewords(ver, ecl));

        let numblocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl);
        let blockecclen = table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl);
        let rawcodewords = Self::num_raw_data_modules(ver) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblocklen = rawcodewords / numblocks;

        let rs = ReedSolomonGenerator::new(blockecclen);
        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(numblocks);
        let mut rest = data;
        for i in 0..numblocks {
            let datlen = shortblocklen - blockecclen + usize::from(i >= numshortblocks);
            let (dat, tail) = rest.split_at(datlen);
            rest = tail;
            let mut block = dat.to_vec();
            let ecc = rs.compute_remainder(dat);
            if i < numshortblocks {
                // Placeholder keeps every block the same length; skipped below.
                block.push(0);
            }
            block.extend_from_slice(&ecc);
            blocks.push(block);
        }

        let mut result = Vec::with_capacity(rawcodewords);
        for i in 0..=shortblocklen {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        debug_assert_eq!(result.len(), rawcodewords);
        result
    }

    /// Places codeword bits in the zig-zag scan order, skipping function modules.
    fn draw_codewords(&mut self, data: &[u8]) {
        let total = data.len() * 8;
        let mut i = 0usize;
        let mut right = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = ((right + 1) & 2) == 0;
            for vert in 0..self.size {
                let y = if upward { self.size - 1 - vert } else { vert };
                for j in 0..2 {
                    let idx = self.index(right - j, y);
                    if !self.function[idx] && i < total {
                        self.modules[idx] = get_bit(u32::from(data[i >> 3]), 7 - (i & 7) as i32);
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, total);
    }

    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let idx = self.index(x, y);
                if self.function[idx] {
                    continue;
                }
                let invert = match mask.value() {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => (x * y) % 2 + (x * y) % 3 == 0,
                    6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
                    _ => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
                };
                self.modules[idx] ^= invert;
            }
        }
    }

    fn penalty_score(&self) -> i32 {
        let size = self.size;
        let mut result = 0;

        for y in 0..size {
            result += self.line_penalty(|x| self.get_module(x, y));
        }
        for x in 0..size {
            result += self.line_penalty(|y| self.get_module(x, y));
        }

        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.get_module(x, y);
                if color == self.get_module(x + 1, y)
                    && color == self.get_module(x, y + 1)
                    && color == self.get_module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        let dark = self.modules.iter().filter(|&&m| m).count() as i32;
        let total = size * size;
        // Smallest k such that (45-5k)% <= dark share <= (55+5k)%
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        result + k * PENALTY_N4
    }

    /// Run-length and finder-like penalties along one row or column.
    fn line_penalty(&self, module: impl Fn(i32) -> bool) -> i32 {
        let mut result = 0;
        let mut runcolor = false;
        let mut runlen = 0;
        let mut history = FinderPenalty::new(self.size);
        for pos in 0..self.size {
            let color = module(pos);
            if color == runcolor {
                runlen += 1;
                if runlen == 5 {
                    result += PENALTY_N1;
                } else if runlen > 5 {
                    result += 1;
                }
            } else {
                history.add_history(runlen);
                if !runcolor {
                    result += history.count_patterns() * PENALTY_N3;
                }
                runcolor = color;
                runlen = 1;
            }
        }
        result + history.terminate_and_count(runcolor, runlen) * PENALTY_N3
    }

    fn alignment_pattern_positions(&self) -> Vec<i32> {
        let ver = i32::from(self.version.value());
        if ver == 1 {
            return Vec::new();
        }
        let numalign = ver / 7 + 2;
        let step = if ver == 32 {
            26
        } else {
            (ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
        };
        let mut result: Vec<i32> = (0..numalign - 1).map(|i| self.size - 7 - i * step).collect();
        result.push(6);
        result.reverse();
        result
    }

    /// Data modules available after function patterns, including remainder bits.
    fn num_raw_data_modules(ver: Version) -> usize {
        let ver = usize::from(ver.value());
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    fn num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
        Self::num_raw_data_modules(ver) / 8
            - table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
                * table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
    }
}

fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: QrCodeEcc) -> usize {
    table[ecl.ordinal()][usize::from(ver.value())] as usize
}

fn get_bit(x: u32, i: i32) -> bool {
    ((x >> i) & 1) != 0
}

struct ReedSolomonGenerator {
    divisor: Vec<u8>,
}

impl ReedSolomonGenerator {
    fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "Degree out of range");
        // Coefficients from highest to lowest power, leading 1 omitted.
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1;
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Self::multiply(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Self::multiply(root, 0x02);
        }
        Self { divisor }
    }

    fn compute_remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.divisor.len()];
        for &b in data {
            let factor = b ^ result.remove(0);
            result.push(0);
            for (x, &y) in result.iter_mut().zip(&self.divisor) {
                *x ^= Self::multiply(y, factor);
            }
        }
        result
    }

    /// Product in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1.
    fn multiply(x: u8, y: u8) -> u8 {
        let mut z: u8 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * 0x1D);
            z ^= ((y >> i) & 1) * x;
        }
        z
    }
}

struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(qr_size: i32) -> Self {
        Self {
            qr_size,
            run_history: [0; 7],
        }
    }

    fn add_history(&mut self, mut runlen: i32) {
        if self.run_history[0] == 0 {
            // Light border before the first run
            runlen += self.qr_size;
        }
        self.run_history.copy_within(0..6, 1);
        self.run_history[0] = runlen;
    }

    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n) + i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, runcolor: bool, mut runlen: i32) -> i32 {
        if runcolor {
            self.add_history(runlen);
            runlen = 0;
        }
        runlen += self.qr_size;
        self.add_history(runlen);
        self.count_patterns()
    }
}

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    fn ordinal(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::Quartile => 2,
            Self::High => 3,
        }
    }

    /// The 2-bit value stored in the format information.
    fn format_bits(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 0,
            Self::Quartile => 3,
            Self::High => 2,
        }
    }
}

/// A run of text packed in one encoding mode.
#[derive(Clone, Debug)]
pub struct QrSegment {
    mode: QrSegmentMode,
    numchars: usize,
    data: BitBuffer,
}

impl QrSegment {
    /// Picks the most compact mode that can represent all of `text`.
    pub fn for_text(text: &str) -> Self {
        if Self::is_numeric(text) {
            Self::make_numeric(text)
        } else if Self::is_alphanumeric(text) {
            Self::make_alphanumeric(text)
        } else {
            Self::make_bytes(text.as_bytes())
        }
    }

    pub fn make_bytes(data: &[u8]) -> Self {
        let mut bb = BitBuffer::default();
        for &b in data {
            bb.append_bits(u32::from(b), 8);
        }
        Self {
            mode: QrSegmentMode::Byte,
            numchars: data.len(),
            data: bb,
        }
    }

    /// Packs decimal digits three to ten bits. Non-digits are skipped, so check with
    /// [`QrSegment::is_numeric`] first.
    pub fn make_numeric(text: &str) -> Self {
        let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();
        let mut bb = BitBuffer::default();
        for group in digits.chunks(3) {
            let value = group.iter().fold(0, |acc, &d| acc * 10 + d);
            bb.append_bits(value, group.len() as u8 * 3 + 1);
        }
        Self {
            mode: QrSegmentMode::Numeric,
            numchars: digits.len(),
            data: bb,
        }
    }

    /// Packs characters from `0-9 A-Z $%*+-./:` and space, two to eleven bits.
    /// Other characters are skipped, so check with [`QrSegment::is_alphanumeric`] first.
    pub fn make_alphanumeric(text: &str) -> Self {
        let values: Vec<u32> = text
            .chars()
            .filter_map(|c| ALPHANUMERIC_CHARSET.find(c))
            .map(|i| i as u32)
            .collect();
        let mut bb = BitBuffer::default();
        for pair in values.chunks(2) {
            match *pair {
                [a, b] => bb.append_bits(a * 45 + b, 11),
                [a] => bb.append_bits(a, 6),
                _ => unreachable!(),
            }
        }
        Self {
            mode: QrSegmentMode::Alphanumeric,
            numchars: values.len(),
            data: bb,
        }
    }

    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    /// Header plus payload bits at `version`, or `None` if the character count overflows
    /// the count field.
    fn total_bits(&self, version: Version) -> Option<usize> {
        let ccbits = self.mode.num_char_count_bits(version);
        if self.numchars >= 1usize << ccbits {
            return None;
        }
        Some(4 + usize::from(ccbits) + self.data.len())
    }

    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }
}

static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QrSegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl QrSegmentMode {
    fn mode_bits(self) -> u32 {
        match self {
            Self::Numeric => 0x1,
            Self::Alphanumeric => 0x2,
            Self::Byte => 0x4,
        }
    }

    fn num_char_count_bits(self, ver: Version) -> u8 {
        let widths = match self {
            Self::Numeric => [10, 12, 14],
            Self::Alphanumeric => [9, 11, 13],
            Self::Byte => [8, 16, 16],
        };
        widths[usize::from((ver.value() + 7) / 17)]
    }
}

#[derive(Clone, Debug, Default)]
struct BitBuffer(Vec<bool>);

impl BitBuffer {
    fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends the low `len` bits of `val`, most significant first.
    fn append_bits(&mut self, val: u32, len: u8) {
        debug_assert!(len <= 31 && (val >> len) == 0);
        self.0.extend((0..len).rev().map(|i| (val >> i) & 1 != 0));
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Mask(u8);

impl Mask {
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}
