use itertools::Itertools;
use std::{
    collections::BTreeSet,
    fmt, fs, io,
    num::ParseIntError,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type Expense = i64;
type Product = i128;

const TARGET: Expense = 2020;
const INPUT_PATH: &str = "input.txt";

#[derive(Debug, Error)]
enum Error {
    #[error("Unable to read {}: {source}", .path.display())]
    MissingInput { path: PathBuf, source: io::Error },

    #[error("Line {line} ({text:?}) is not an integer: {source}")]
    Parse {
        line: usize,
        text: String,
        source: ParseIntError,
    },

    #[error("No {arity} of distinct expenses sums to {target}")]
    NoSolution { arity: Arity, target: Expense },

    #[error("Product of {combination:?} does not fit in {} bits", Product::BITS)]
    ProductOverflow { combination: Vec<Expense> },
}

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Arity {
    Pair,
    Triple,
}

impl Arity {
    fn size(self) -> usize {
        match self {
            Arity::Pair => 2,
            Arity::Triple => 3,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Pair => f.write_str("pair"),
            Arity::Triple => f.write_str("triple"),
        }
    }
}

fn parse_expenses(input: &str) -> Result<Vec<Expense>> {
    input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .map(|(line, text)| {
            text.parse().map_err(|source| Error::Parse {
                line,
                text: text.to_owned(),
                source,
            })
        })
        .collect()
}

fn load_expenses(path: impl AsRef<Path>) -> Result<Vec<Expense>> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| Error::MissingInput {
        path: path.to_owned(),
        source,
    })?;

    let expenses = parse_expenses(&input)?;
    debug!(path = %path.display(), count = expenses.len(), "Loaded expenses");
    Ok(expenses)
}

/// Values are compared, not positions: two entries of 1010 can never pair up.
fn all_distinct(combination: &[Expense]) -> bool {
    combination.iter().tuple_combinations().all(|(a, b)| a != b)
}

fn checked_sum(combination: &[Expense]) -> Option<Expense> {
    combination
        .iter()
        .try_fold(0 as Expense, |acc, &v| acc.checked_add(v))
}

/// Walks the Cartesian power of `expenses` in nested-loop order (the leftmost
/// position varies slowest) and returns the first tuple of pairwise-distinct
/// values summing to `target`. Tuples whose sum overflows are skipped.
fn find_combination(expenses: &[Expense], arity: Arity, target: Expense) -> Result<Vec<Expense>> {
    itertools::repeat_n(expenses.iter().copied(), arity.size())
        .multi_cartesian_product()
        .find(|c| all_distinct(c) && checked_sum(c) == Some(target))
        .ok_or(Error::NoSolution { arity, target })
}

/// Finds the same pair as `find_combination` with `Arity::Pair`, without the
/// quadratic walk.
fn find_pair_indexed(expenses: &[Expense], target: Expense) -> Result<Vec<Expense>> {
    let present: BTreeSet<_> = expenses.iter().copied().collect();

    expenses
        .iter()
        .copied()
        .find_map(|a| {
            let b = target.checked_sub(a)?;
            if a != b && present.contains(&b) {
                Some(vec![a, b])
            } else {
                None
            }
        })
        .ok_or(Error::NoSolution {
            arity: Arity::Pair,
            target,
        })
}

fn product(combination: &[Expense]) -> Result<Product> {
    combination
        .iter()
        .try_fold(1 as Product, |acc, &v| acc.checked_mul(v.into()))
        .ok_or_else(|| Error::ProductOverflow {
            combination: combination.to_owned(),
        })
}

fn report(combination: &[Expense]) -> Result<Product> {
    let product = product(combination)?;
    info!(?combination, %product, "Found combination");
    Ok(product)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let expenses = load_expenses(INPUT_PATH)?;

    let pair = find_pair_indexed(&expenses, TARGET)?;
    println!("{}", report(&pair)?);

    let triple = find_combination(&expenses, Arity::Triple, TARGET)?;
    println!("{}", report(&triple)?);

    Ok(())
}
