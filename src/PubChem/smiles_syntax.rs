/// Syntactic check of SMILES strings (OpenSMILES grammar, no valence or aromaticity perception).
///
/// The scanner walks the string once and keeps track of
/// - whether there is an atom the next bond, branch or ring label can attach to
/// - a pending bond symbol that still needs an atom on its right side
/// - open branches and whether each of them already holds an atom
/// - open ring-closure labels with the bond symbol written at the opening side
/// - whether the previous token was an atom or a ring label, the only places a ring label may follow
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SmilesSyntaxError {
    #[error("empty SMILES")]
    Empty,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },
    #[error("bracket atom opened at position {pos} is not closed")]
    UnclosedBracketAtom { pos: usize },
    #[error("invalid bracket atom [{content}] at position {pos}")]
    InvalidBracketAtom { content: String, pos: usize },
    #[error("'{ch}' at position {pos} has no atom to attach to")]
    NothingToAttach { ch: char, pos: usize },
    #[error("bond at position {pos} is not followed by an atom")]
    DanglingBond { pos: usize },
    #[error("branch opened at position {pos} is not closed")]
    UnclosedBranch { pos: usize },
    #[error("empty branch at position {pos}")]
    EmptyBranch { pos: usize },
    #[error("ring bond {label} is not closed")]
    UnclosedRing { label: u32 },
    #[error("ring bond {label} closes on the atom that opened it")]
    RingSelfLoop { label: u32 },
    #[error("ring bond {label} is opened and closed with different bond symbols")]
    RingBondMismatch { label: u32 },
}

const ORGANIC_TWO_LETTER: [&str; 2] = ["Cl", "Br"];
const ORGANIC_ONE_LETTER: &str = "BCNOPSFIbcnops*";
const BOND_SYMBOLS: &str = "-=#$:/\\";

fn bracket_atom_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // isotope? symbol chirality? hcount? charge? class?
        Regex::new(
            r"^(\d+)?(se|as|te|[A-Z][a-z]?|[bcnops]|\*)(@(TH[12]|AL[12]|SP[1-3]|TB\d{1,2}|OH\d{1,2}|@)?)?(H\d?)?([+-]\d{1,2}|\+\+?|--?)?(:\d+)?$",
        )
        .unwrap()
    })
}

struct ScanState {
    has_atom: bool,
    /// atom index of the atom the next bond attaches to
    last_atom: usize,
    atom_count: usize,
    pending_bond: Option<usize>,
    /// (position of '(', branch holds an atom)
    branches: Vec<(usize, bool)>,
    /// ring label -> (atom index that opened it, bond symbol at the opening side)
    rings: HashMap<u32, (usize, Option<char>)>,
    /// previous token was an atom or a ring label
    ring_bond_allowed: bool,
    /// atom the branch starts from, restored on ')'
    branch_roots: Vec<usize>,
}

impl ScanState {
    fn new() -> Self {
        Self {
            has_atom: false,
            last_atom: 0,
            atom_count: 0,
            pending_bond: None,
            branches: Vec::new(),
            rings: HashMap::new(),
            ring_bond_allowed: false,
            branch_roots: Vec::new(),
        }
    }

    fn push_atom(&mut self) {
        self.atom_count += 1;
        self.last_atom = self.atom_count;
        self.has_atom = true;
        self.ring_bond_allowed = true;
        self.pending_bond = None;
        if let Some(branch) = self.branches.last_mut() {
            branch.1 = true;
        }
    }

    fn require_atom(&self, ch: char, pos: usize) -> Result<(), SmilesSyntaxError> {
        if !self.has_atom {
            return Err(SmilesSyntaxError::NothingToAttach { ch, pos });
        }
        Ok(())
    }

    /// Opens or closes ring `label` on the last atom. `bond` is the symbol written right
    /// before the label, if any.
    fn ring_label(
        &mut self,
        label: u32,
        bond: Option<char>,
        ch: char,
        pos: usize,
    ) -> Result<(), SmilesSyntaxError> {
        self.require_atom(ch, pos)?;
        // ring labels only follow an atom or another ring label
        if !self.ring_bond_allowed {
            return Err(SmilesSyntaxError::UnexpectedCharacter { ch, pos });
        }
        match self.rings.remove(&label) {
            Some((opened_by, _)) if opened_by == self.last_atom => {
                return Err(SmilesSyntaxError::RingSelfLoop { label });
            }
            Some((_, Some(open_bond)))
                if bond.is_some_and(|b| !same_bond_order(open_bond, b)) =>
            {
                return Err(SmilesSyntaxError::RingBondMismatch { label });
            }
            Some(_) => {}
            None => {
                self.rings.insert(label, (self.last_atom, bond));
            }
        }
        self.pending_bond = None;
        Ok(())
    }
}

/// directional bonds count as single bonds
fn same_bond_order(a: char, b: char) -> bool {
    let order = |c: char| if matches!(c, '-' | '/' | '\\') { '-' } else { c };
    order(a) == order(b)
}

/// Checks that `smiles` is a well-formed SMILES string.
pub fn validate_smiles(smiles: &str) -> Result<(), SmilesSyntaxError> {
    let chars: Vec<char> = smiles.trim().chars().collect();
    if chars.is_empty() {
        return Err(SmilesSyntaxError::Empty);
    }
    let mut state = ScanState::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '[' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&ch| ch == ']')
                    .ok_or(SmilesSyntaxError::UnclosedBracketAtom { pos: i })?;
                let content: String = chars[i + 1..i + 1 + close].iter().collect();
                if !bracket_atom_regex().is_match(&content) {
                    return Err(SmilesSyntaxError::InvalidBracketAtom { content, pos: i });
                }
                state.push_atom();
                i += close + 2;
                continue;
            }
            '(' => {
                state.require_atom(c, i)?;
                if let Some(pos) = state.pending_bond {
                    return Err(SmilesSyntaxError::DanglingBond { pos });
                }
                state.branches.push((i, false));
                state.branch_roots.push(state.last_atom);
                state.ring_bond_allowed = false;
            }
            ')' => {
                let (open, has_atom) = state
                    .branches
                    .pop()
                    .ok_or(SmilesSyntaxError::UnexpectedCharacter { ch: c, pos: i })?;
                if let Some(pos) = state.pending_bond {
                    return Err(SmilesSyntaxError::DanglingBond { pos });
                }
                if !has_atom {
                    return Err(SmilesSyntaxError::EmptyBranch { pos: open });
                }
                if let Some(root) = state.branch_roots.pop() {
                    state.last_atom = root;
                }
                state.ring_bond_allowed = false;
            }
            '.' => {
                state.require_atom(c, i)?;
                if let Some(pos) = state.pending_bond {
                    return Err(SmilesSyntaxError::DanglingBond { pos });
                }
                state.has_atom = false;
                state.ring_bond_allowed = false;
                // a dot needs a component on its right
                state.pending_bond = Some(i);
            }
            '%' => {
                let digits: String = chars[i + 1..].iter().take(2).collect();
                if digits.len() != 2 || !digits.chars().all(|d| d.is_ascii_digit()) {
                    return Err(SmilesSyntaxError::UnexpectedCharacter { ch: c, pos: i });
                }
                let label = digits
                    .parse::<u32>()
                    .map_err(|_| SmilesSyntaxError::UnexpectedCharacter { ch: c, pos: i })?;
                let bond = state.pending_bond.map(|pos| chars[pos]);
                state.ring_label(label, bond, c, i)?;
                i += 3;
                continue;
            }
            d if d.is_ascii_digit() => {
                let label = d.to_digit(10).unwrap_or_default();
                let bond = state.pending_bond.map(|pos| chars[pos]);
                state.ring_label(label, bond, c, i)?;
            }
            b if BOND_SYMBOLS.contains(b) => {
                state.require_atom(c, i)?;
                if let Some(pos) = state.pending_bond {
                    return Err(SmilesSyntaxError::DanglingBond { pos });
                }
                state.pending_bond = Some(i);
            }
            _ => {
                let two: String = chars[i..chars.len().min(i + 2)].iter().collect();
                if ORGANIC_TWO_LETTER.contains(&two.as_str()) {
                    state.push_atom();
                    i += 2;
                    continue;
                }
                if ORGANIC_ONE_LETTER.contains(c) {
                    state.push_atom();
                } else {
                    return Err(SmilesSyntaxError::UnexpectedCharacter { ch: c, pos: i });
                }
            }
        }
        i += 1;
    }

    if let Some(pos) = state.pending_bond {
        return Err(SmilesSyntaxError::DanglingBond { pos });
    }
    if let Some(&(pos, _)) = state.branches.last() {
        return Err(SmilesSyntaxError::UnclosedBranch { pos });
    }
    if let Some(&label) = state.rings.keys().min() {
        return Err(SmilesSyntaxError::UnclosedRing { label });
    }
    Ok(())
}
