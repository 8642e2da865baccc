//! Integer operations behind the `fibonacci`, `prime`, `lcm` and `hcf` keys.
//!
//! All functions are pure and CPU-bound.

use thiserror::Error;

/// Longest Fibonacci prefix whose terms all fit in a `u64`.
pub const MAX_FIBONACCI_TERMS: usize = 94;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("term count must be non-negative, got {0}")]
    NegativeCount(i64),

    #[error("{0} requires at least one value")]
    EmptyInput(&'static str),

    #[error("{0} result does not fit in a 64-bit integer")]
    Overflow(&'static str),

    #[error("lcm of 0 and 0 is undefined")]
    UndefinedLcm,
}

/// First `count` Fibonacci terms, starting `0, 1, 1, 2, ...`.
pub fn fibonacci(count: i64) -> Result<Vec<u64>, MathError> {
    let count = usize::try_from(count).map_err(|_| MathError::NegativeCount(count))?;
    let mut terms: Vec<u64> = Vec::with_capacity(count.min(MAX_FIBONACCI_TERMS));

    for index in 0..count {
        let term = match index {
            0 => 0,
            1 => 1,
            _ => terms[index - 1]
                .checked_add(terms[index - 2])
                .ok_or(MathError::Overflow("fibonacci"))?,
        };
        terms.push(term);
    }

    Ok(terms)
}

/// Trial division up to `floor(sqrt(n))`. Anything below 2 is not prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3;
    // divisor <= n / divisor is divisor^2 <= n without overflow.
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// The primes in `values`, in their original order.
pub fn primes(values: &[i64]) -> Vec<i64> {
    values.iter().copied().filter(|&v| is_prime(v)).collect()
}

/// Non-negative greatest common divisor. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple by pairwise reduction:
/// `lcm(acc, x) = |acc * x| / gcd(acc, x)`, seeded with the first value.
pub fn lcm(values: &[i64]) -> Result<i64, MathError> {
    let (&first, rest) = values.split_first().ok_or(MathError::EmptyInput("lcm"))?;

    rest.iter().try_fold(first, |acc, &x| {
        let divisor = gcd(acc, x);
        if divisor == 0 {
            return Err(MathError::UndefinedLcm);
        }
        let product = (i128::from(acc) * i128::from(x)).unsigned_abs();
        i64::try_from(product / u128::from(divisor)).map_err(|_| MathError::Overflow("lcm"))
    })
}

/// Highest common factor by pairwise reduction, seeded with the first value.
pub fn hcf(values: &[i64]) -> Result<i64, MathError> {
    let (&first, rest) = values.split_first().ok_or(MathError::EmptyInput("hcf"))?;

    rest.iter().try_fold(first, |acc, &x| {
        i64::try_from(gcd(acc, x)).map_err(|_| MathError::Overflow("hcf"))
    })
}
