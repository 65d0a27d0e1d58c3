//! Proportional sizing along a dock
//!
//! Flexible items share the available length by weight; items that end up
//! outside their min/max bounds are frozen at the bound and the rest is
//! shared again until nothing moves. Fixed items take their preferred length
//! (clamped) before anything else is distributed.

/// One item to be sized along a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Share weight for flexible items
    pub weight: i32,
    /// Lower bound, 0 for none
    pub min: i32,
    /// Upper bound
    pub max: Option<i32>,
    /// Preferred length of a fixed item; `None` for flexible items
    pub fixed: Option<i32>,
}

impl Allocation {
    pub fn flexible(weight: i32) -> Self {
        Self {
            weight,
            min: 0,
            max: None,
            fixed: None,
        }
    }

    pub fn fixed(length: i32) -> Self {
        Self {
            weight: 0,
            min: 0,
            max: None,
            fixed: Some(length),
        }
    }

    pub fn with_min(mut self, min: i32) -> Self {
        self.min = min.max(0);
        self
    }

    pub fn with_max(mut self, max: Option<i32>) -> Self {
        self.max = max.map(|m| m.max(0));
        self
    }

    fn clamp(&self, length: i32) -> i32 {
        let upper = self.max.map_or(length, |max| length.min(max.max(self.min)));
        upper.max(self.min)
    }
}

/// Split `length` among `items`.
///
/// When `sum(min) <= length <= sum(max)` (and fixed items fit) the result sums
/// to `length` exactly. If the minimums do not fit, every item gets its
/// minimum and the total overflows `length`. If every item reaches its
/// maximum, the leftover is not allocated.
pub fn apportion(length: i32, items: &[Allocation]) -> Vec<i32> {
    let mut sizes = vec![0; items.len()];
    let mut frozen = vec![false; items.len()];
    let mut remaining = length as i64;

    for (i, item) in items.iter().enumerate() {
        if let Some(preferred) = item.fixed {
            sizes[i] = item.clamp(preferred);
            frozen[i] = true;
            remaining -= sizes[i] as i64;
        }
    }

    loop {
        let open: Vec<usize> = (0..items.len()).filter(|&i| !frozen[i]).collect();
        if open.is_empty() {
            break;
        }

        let weights: Vec<i64> = open.iter().map(|&i| items[i].weight.max(0) as i64).collect();
        let shares = distribute(remaining.max(0), &weights);

        let mut violation = 0i64;
        for (slot, &i) in open.iter().enumerate() {
            violation += items[i].clamp(shares[slot] as i32) as i64 - shares[slot];
        }

        if violation == 0 {
            for (slot, &i) in open.iter().enumerate() {
                sizes[i] = shares[slot] as i32;
            }
            break;
        }

        for (slot, &i) in open.iter().enumerate() {
            let clamped = items[i].clamp(shares[slot] as i32) as i64;
            let hit = if violation > 0 {
                clamped > shares[slot]
            } else {
                clamped < shares[slot]
            };
            if hit {
                sizes[i] = clamped as i32;
                frozen[i] = true;
                remaining -= clamped;
            }
        }
    }

    sizes
}

/// Largest-remainder split of `space` by `weights`. All-zero weights split
/// evenly.
fn distribute(space: i64, weights: &[i64]) -> Vec<i64> {
    let total: i64 = weights.iter().sum();
    let weights: Vec<i64> = if total == 0 {
        vec![1; weights.len()]
    } else {
        weights.to_vec()
    };
    let total: i64 = weights.iter().sum();

    let mut shares: Vec<i64> = weights.iter().map(|w| space * w / total).collect();
    let mut leftover = space - shares.iter().sum::<i64>();

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse((space * weights[i]) % total));
    for i in order {
        if leftover == 0 {
            break;
        }
        shares[i] += 1;
        leftover -= 1;
    }
    shares
}
