use crate::std::vec;
use crate::std::vec::Vec;

use super::{CodeSet, Segment, SHIFT, START_B};
use crate::Bar;

pub(crate) const PATTERNS: [u16; 109] = [
    0x6cc, 0x66c, 0x666, 0x498, 0x48c, 0x44c, 0x4c8, 0x4c4, 0x464, 0x648, 0x644, 0x624, 0x59c,
    0x4dc, 0x4ce, 0x5cc, 0x4ec, 0x4e6, 0x672, 0x65c, 0x64e, 0x6e4, 0x674, 0x76e, 0x74c, 0x72c,
    0x726, 0x764, 0x734, 0x732, 0x6d8, 0x6c6, 0x636, 0x518, 0x458, 0x446, 0x588, 0x468, 0x462,
    0x688, 0x628, 0x622, 0x5b8, 0x58e, 0x46e, 0x5d8, 0x5c6, 0x476, 0x776, 0x68e, 0x62e, 0x6e8,
    0x6e2, 0x6ee, 0x758, 0x746, 0x716, 0x768, 0x762, 0x71a, 0x77a, 0x642, 0x78a, 0x530, 0x50c,
    0x4b0, 0x486, 0x42c, 0x426, 0x590, 0x584, 0x4d0, 0x4c2, 0x434, 0x432, 0x612, 0x650, 0x7ba,
    0x614, 0x47a, 0x53c, 0x4bc, 0x49e, 0x5e4, 0x4f4, 0x4f2, 0x7a4, 0x794, 0x792, 0x6de, 0x6f6,
    0x7b6, 0x578, 0x51e, 0x45e, 0x5e8, 0x5e2, 0x7a8, 0x7a2, 0x5de, 0x5ee, 0x75e, 0x7ae, 0x684,
    0x690, 0x69c, 0x63a, 0x6b8, 0x18eb,
];

const SETS: [CodeSet; 3] = [CodeSet::A, CodeSet::B, CodeSet::C];

impl CodeSet {
    /// Whether a single byte can be encoded, digits never fit C alone.
    #[inline]
    fn fits(self, byte: u8) -> bool {
        match self {
            CodeSet::A => byte < 0x60,
            CodeSet::B => (0x20..0x80).contains(&byte),
            CodeSet::C => false,
        }
    }

    /// The other one of A and B.
    #[inline]
    fn other(self) -> Self {
        match self {
            CodeSet::A => CodeSet::B,
            _ => CodeSet::A,
        }
    }

    /// Number of bytes at the head of `data` one symbol of this set takes.
    fn width(self, data: &[u8]) -> Option<usize> {
        match (self, data) {
            (CodeSet::C, [c1, c2, ..]) if c1.is_ascii_digit() && c2.is_ascii_digit() => Some(2),
            (CodeSet::C, _) => None,
            (_, [byte, ..]) if self.fits(*byte) => Some(1),
            _ => None,
        }
    }

    fn value(self, byte: u8) -> u8 {
        match self {
            CodeSet::A if byte < 0x20 => byte + 0x40,
            _ => byte - b' ',
        }
    }
}

fn push_segment(segments: &mut Vec<Segment>, code_set: CodeSet, data: &[u8], shift: bool) {
    match segments.last_mut() {
        Some(last) if !shift && !last.shift && last.code_set == code_set => {
            last.data.extend_from_slice(data);
        }
        _ => segments.push(Segment {
            code_set,
            data: data.to_vec(),
            shift,
        }),
    }
}

fn digit_run(data: &[u8]) -> usize {
    data.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// A or B, by the first byte that only one of them can encode.
fn pick_ab(data: &[u8]) -> CodeSet {
    data.iter()
        .find_map(|&byte| match (CodeSet::A.fits(byte), CodeSet::B.fits(byte)) {
            (true, false) => Some(CodeSet::A),
            (false, true) => Some(CodeSet::B),
            _ => None,
        })
        .unwrap_or(CodeSet::B)
}

/// Segment with the conventional rules.
///
/// Runs of four or more digits go to code set C. Odd runs leave one digit
/// to A or B: the first one if a set is already active, the last one at the
/// start. Input of exactly two digits is a single C symbol. A single byte
/// the active set can not encode is shifted if more data follows.
pub(super) fn segment_greedy(data: &[u8]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<CodeSet> = None;
    let mut rest = data;
    while let Some(&byte) = rest.first() {
        let run = digit_run(rest);
        if current == Some(CodeSet::C) && run >= 2 {
            push_segment(&mut segments, CodeSet::C, &rest[..2], false);
            rest = &rest[2..];
            continue;
        }
        let long_run = run >= 4 && (run % 2 == 0 || current.is_none());
        let only_pair = current.is_none() && run == 2 && rest.len() == 2;
        if long_run || only_pair {
            let len = run - run % 2;
            push_segment(&mut segments, CodeSet::C, &rest[..len], false);
            rest = &rest[len..];
            current = Some(CodeSet::C);
            continue;
        }

        let set = match current {
            Some(set @ (CodeSet::A | CodeSet::B)) => set,
            _ => pick_ab(rest),
        };
        if set.fits(byte) {
            push_segment(&mut segments, set, &rest[..1], false);
            current = Some(set);
        } else {
            let misfits = rest.iter().take_while(|&&b| !set.fits(b)).count();
            let shift = misfits == 1 && rest.len() > 1;
            push_segment(&mut segments, set.other(), &rest[..1], shift);
            current = Some(if shift { set } else { set.other() });
        }
        rest = &rest[1..];
    }
    segments
}

#[derive(Debug, Clone, Copy)]
struct Step {
    code_set: CodeSet,
    len: usize,
    shift: bool,
    /// Index into [`SETS`] of the active set afterwards.
    next: usize,
}

/// Segment with the least number of symbols.
///
/// `cost[i][s]` is the number of symbols needed for `data[i..]` if set `s`
/// is active, computed backwards from the end of the data.
pub(super) fn segment_optimal(data: &[u8]) -> Vec<Segment> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    let mut cost = vec![[usize::MAX; 3]; n + 1];
    let mut steps: Vec<[Option<Step>; 3]> = vec![[None; 3]; n + 1];
    cost[n] = [0; 3];

    for i in (0..n).rev() {
        let rest = &data[i..];
        for (s, &set) in SETS.iter().enumerate() {
            let mut best: Option<(usize, Step)> = None;
            let mut consider = |symbols: usize, step: Step| {
                let total = cost[i + step.len][step.next].saturating_add(symbols);
                if best.map_or(true, |(b, _)| total < b) {
                    best = Some((total, step));
                }
            };
            if let Some(len) = set.width(rest) {
                consider(1, Step { code_set: set, len, shift: false, next: s });
            }
            if set != CodeSet::C && !set.fits(rest[0]) && set.other().fits(rest[0]) {
                let step = Step { code_set: set.other(), len: 1, shift: true, next: s };
                consider(2, step);
            }
            for (t, &target) in SETS.iter().enumerate().filter(|&(t, _)| t != s) {
                if let Some(len) = target.width(rest) {
                    consider(2, Step { code_set: target, len, shift: false, next: t });
                }
            }
            if let Some((total, step)) = best {
                cost[i][s] = total;
                steps[i][s] = Some(step);
            }
        }
    }

    let start = SETS
        .iter()
        .enumerate()
        .filter_map(|(t, &set)| {
            let len = set.width(data)?;
            let total = cost[len][t].saturating_add(1);
            Some((total, Step { code_set: set, len, shift: false, next: t }))
        })
        .min_by_key(|(total, _)| *total)
        .map(|(_, step)| step);

    let mut segments = Vec::new();
    let mut i = 0;
    let mut step = start;
    while let Some(Step { code_set, len, shift, next }) = step {
        push_segment(&mut segments, code_set, &data[i..i + len], shift);
        i += len;
        step = steps[i][next];
    }
    segments
}

/// Symbol values from the start symbol on, without checksum and stop.
pub(super) fn assemble(segments: &[Segment]) -> Vec<u8> {
    let mut indices = Vec::new();
    let mut active = None;
    for segment in segments {
        match active {
            None => {
                indices.push(segment.code_set.start());
                active = Some(segment.code_set);
            }
            Some(_) if segment.shift => indices.push(SHIFT),
            Some(set) if set != segment.code_set => {
                indices.push(segment.code_set.switch());
                active = Some(segment.code_set);
            }
            Some(_) => (),
        }
        match segment.code_set {
            CodeSet::C => indices.extend(
                segment
                    .data
                    .chunks_exact(2)
                    .map(|pair| (pair[0] - b'0') * 10 + (pair[1] - b'0')),
            ),
            set => indices.extend(segment.data.iter().map(|&byte| set.value(byte))),
        }
    }
    if indices.is_empty() {
        indices.push(START_B);
    }
    indices
}

pub(crate) fn bits_to_bars(mut bits: u16) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(3);
    while bits != 0 {
        let mut width = 0;
        let zeroes = bits.leading_zeros();
        for i in (0..(16 - zeroes)).rev() {
            if bits & (1 << i) != 0 {
                width += 1;
                bits ^= 1 << i;
            } else {
                break;
            }
        }
        bars.push(Bar {
            width: width as u8,
            space: (bits.leading_zeros() - width - zeroes) as u8,
        });
    }
    bars
}

#[cfg(test)]
use super::{START_A, START_C, SWITCH_B, SWITCH_C};

#[cfg(test)]
fn greedy(data: &[u8]) -> Vec<u8> {
    assemble(&segment_greedy(data))
}

#[test]
fn test_bits_to_bars() {
    assert_eq!(bits_to_bars(0), vec![]);
    let bars = bits_to_bars(0b10000011010);
    assert_eq!(
        bars,
        vec![
            Bar { width: 1, space: 5 },
            Bar { width: 2, space: 1 },
            Bar { width: 1, space: 1 },
        ]
    );
    let bars = bits_to_bars(0b1100011101011);
    assert_eq!(
        bars,
        vec![
            Bar { width: 2, space: 3 },
            Bar { width: 3, space: 1 },
            Bar { width: 1, space: 1 },
            Bar { width: 2, space: 0 },
        ]
    );
}

#[test]
fn test_patterns() {
    for (i, pattern) in PATTERNS.iter().cloned().enumerate() {
        assert_eq!(super::decode::lookup(pattern), Ok(i as u8));
    }
}

#[test]
fn test_short_digit_runs() {
    // three digits are cheaper in B
    assert_eq!(greedy(b"123"), vec![START_B, 17, 18, 19]);
    assert_eq!(greedy(b"1234"), vec![START_C, 12, 34]);
    assert_eq!(greedy(b"12"), vec![START_C, 12]);
    assert_eq!(greedy(b""), vec![START_B]);
    for msg in [b"000", b"00a"] {
        let indices = greedy(msg);
        assert_ne!(indices[0], START_C);
        assert_eq!(indices.len(), 4);
    }
}

#[test]
fn test_odd_digit_runs() {
    // mid-stream the first digit stays in B
    assert_eq!(greedy(b"a12345"), vec![START_B, 65, 17, SWITCH_C, 23, 45]);
    // at the start the last digit goes to B
    assert_eq!(greedy(b"12345a"), vec![START_C, 12, 34, SWITCH_B, 21, 65]);
}

#[test]
fn test_switch_instead_of_shift() {
    assert_eq!(
        greedy(b"\nab"),
        vec![START_A, b'\n' + 0x40, SWITCH_B, b'a' - b' ', b'b' - b' '],
    )
}

#[test]
fn test_shift() {
    assert_eq!(
        greedy(b"HELLO\n123456w0r1\rd"),
        vec![
            START_A, 40, 37, 44, 44, 47, 74, SWITCH_C, 12, 34, 56, SWITCH_B, 87, 16, 82, 17,
            SHIFT, 77, 68
        ],
    );
    let segments = segment_greedy(b"a\x00b");
    assert_eq!(
        segments[1],
        Segment {
            code_set: CodeSet::A,
            data: vec![0],
            shift: true
        }
    );
    assert_eq!(segments.len(), 3);
}

#[test]
fn test_shortest() {
    let data = b"8\x009c29bb";
    assert_eq!(greedy(data).len(), 11);
    assert_eq!(
        assemble(&segment_optimal(data)),
        vec![START_A, 24, 64, 25, SWITCH_B, 67, 18, 25, 66, 66]
    );
    assert_eq!(
        assemble(&segment_optimal(b"\x0028b4c0")),
        vec![START_A, 64, 18, 24, SWITCH_B, 66, 20, 67, 16]
    );
    assert!(segment_optimal(b"").is_empty());
}

#[test]
fn test_shortest_never_longer() {
    let inputs: [&[u8]; 8] = [
        b"1234RRRaaafff12345\x00",
        b"RtGh1452CVB",
        b"856bcg7854",
        b"\x00\x01ABcd",
        b"1245\x7fbcde",
        b"ab\x00\x00cd",
        b"a1234b",
        b"A39c\x00309\x0072",
    ];
    for data in inputs {
        assert!(assemble(&segment_optimal(data)).len() <= greedy(data).len());
    }
}
