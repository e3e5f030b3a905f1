//! Integer partition generation.
//!
//! Kelleher's ascending-composition generator (`AccelAsc`), written as an
//! explicit state machine. Each step derives the next partition from the
//! previous one by moving two cursors over a fixed scratch array, so the
//! amortized cost per partition is constant.

/// Iterator over every partition of `n`, each emitted once as a
/// non-decreasing sequence of positive parts.
///
/// The partition of zero is the empty sequence.
#[derive(Clone, Debug)]
pub struct AscendingPartitions {
    parts: Vec<usize>,
    k: usize,
    x: usize,
    y: usize,
    stage: Stage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Empty,
    Descend,
    Split,
    Done,
}

impl AscendingPartitions {
    pub fn new(n: usize) -> Self {
        if n == 0 {
            return Self {
                parts: Vec::new(),
                k: 0,
                x: 0,
                y: 0,
                stage: Stage::Empty,
            };
        }
        Self {
            parts: vec![0; n + 1],
            k: 1,
            x: 0,
            y: n - 1,
            stage: Stage::Descend,
        }
    }
}

impl Iterator for AscendingPartitions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            match self.stage {
                Stage::Done => return None,
                Stage::Empty => {
                    self.stage = Stage::Done;
                    return Some(Vec::new());
                }
                Stage::Descend => {
                    if self.k == 0 {
                        self.stage = Stage::Done;
                        return None;
                    }
                    let mut x = self.parts[self.k - 1] + 1;
                    self.k -= 1;
                    while 2 * x <= self.y {
                        self.parts[self.k] = x;
                        self.y -= x;
                        self.k += 1;
                    }
                    self.x = x;
                    self.stage = Stage::Split;
                }
                Stage::Split => {
                    let k = self.k;
                    if self.x <= self.y {
                        self.parts[k] = self.x;
                        self.parts[k + 1] = self.y;
                        self.x += 1;
                        self.y -= 1;
                        return Some(self.parts[..k + 2].to_vec());
                    }
                    // Fold the last two parts into one; x >= 1 so y stays non-negative.
                    let merged = self.x + self.y;
                    self.parts[k] = merged;
                    self.y = merged - 1;
                    self.stage = Stage::Descend;
                    return Some(self.parts[..k + 1].to_vec());
                }
            }
        }
    }
}
