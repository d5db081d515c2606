//! The `TO + GO = OUT` cryptarithm.
//!
//! Each letter stands for a distinct decimal digit and no number starts
//! with zero. The only solution is `21 + 81 = 102`.

use rewind_search::SearchContext;

/// Digits assigned to the puzzle's letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub t: u32,
    pub o: u32,
    pub g: u32,
    pub u: u32,
}

impl Assignment {
    pub fn to(&self) -> u32 {
        10 * self.t + self.o
    }

    pub fn go(&self) -> u32 {
        10 * self.g + self.o
    }

    pub fn out(&self) -> u32 {
        100 * self.o + 10 * self.u + self.t
    }

    /// Returns true if the digits are distinct and the sum holds.
    pub fn is_solution(&self) -> bool {
        let digits = [self.t, self.o, self.g, self.u];
        let distinct = digits
            .iter()
            .enumerate()
            .all(|(i, d)| !digits[i + 1..].contains(d));
        distinct && self.t != 0 && self.g != 0 && self.o != 0 && self.to() + self.go() == self.out()
    }
}

/// Picks a digit not used yet.
fn choose_digit(ctx: &mut SearchContext<Assignment>, used: &mut Vec<u32>) -> u32 {
    let free: Vec<u32> = (0..10).filter(|d| !used.contains(d)).collect();
    let digit = ctx.choose_from(free);
    used.push(digit);
    digit
}

/// Solves the puzzle column by column, pruning as soon as a column fails.
pub fn to_go_out(ctx: &mut SearchContext<Assignment>) -> Assignment {
    let mut used = Vec::with_capacity(4);

    let o = choose_digit(ctx, &mut used);
    ctx.require(o != 0);

    // Units: O + O = T (mod 10).
    let t = choose_digit(ctx, &mut used);
    ctx.require(t != 0 && (o + o) % 10 == t);
    let carry = (o + o) / 10;

    // Tens: T + G + carry = U (mod 10), and the final carry is O.
    let g = choose_digit(ctx, &mut used);
    ctx.require(g != 0 && (t + g + carry) / 10 == o);

    let u = choose_digit(ctx, &mut used);
    ctx.require((t + g + carry) % 10 == u);

    Assignment { t, o, g, u }
}
