/// The game truncates groups beyond 10 when a level is saved in the editor
pub const MAX_GROUPS_PER_OBJECT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackState {
    /// Appending digits to the open group list
    Filling,

    /// The open list must be closed before the next digit fits
    FlushCheck,

    /// The open list holds exactly two digits: emit the first, carry the
    /// second into a fresh list
    SplitCarry,
}

/// Greedily distribute digits into per-object group lists.
///
/// Every emitted list satisfies the constraints the game imposes on an
/// object's groups:
///
/// - at most [`MAX_GROUPS_PER_OBJECT`] entries
/// - no repeated entry (the game deduplicates groups)
/// - never exactly two entries (`"X.Y"` is read back as a float)
///
/// ```
/// use gdstore::packing::GroupPacker;
///
/// let mut packer = GroupPacker::new();
/// for digit in [5, 6, 5, 7] {
///     packer.push(digit);
/// }
/// assert_eq!(packer.finish(), vec![vec![5], vec![6, 5, 7]]);
/// ```
#[derive(Debug)]
pub struct GroupPacker {
    state: PackState,
    current: Vec<u16>,
    lists: Vec<Vec<u16>>,
}

impl Default for GroupPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupPacker {
    /// Creates an empty packer
    pub fn new() -> Self {
        GroupPacker {
            state: PackState::Filling,
            current: Vec::with_capacity(MAX_GROUPS_PER_OBJECT),
            lists: Vec::new(),
        }
    }

    /// Creates a packer sized for the given number of digits
    pub fn with_capacity(digits: usize) -> Self {
        let mut packer = Self::new();
        packer.lists.reserve(digits / 4 + 1);
        packer
    }

    /// Feed the next digit
    pub fn push(&mut self, digit: u16) {
        loop {
            match self.state {
                PackState::Filling => {
                    if self.current.len() >= MAX_GROUPS_PER_OBJECT
                        || self.current.contains(&digit)
                    {
                        self.state = PackState::FlushCheck;
                    } else {
                        self.current.push(digit);
                        return;
                    }
                }
                PackState::FlushCheck => {
                    if self.current.len() == 2 {
                        self.state = PackState::SplitCarry;
                    } else {
                        let list = std::mem::take(&mut self.current);
                        self.emit(list);
                        self.state = PackState::Filling;
                    }
                }
                PackState::SplitCarry => {
                    self.split_carry();

                    // the carried digit is checked against `digit` again
                    self.state = PackState::Filling;
                }
            }
        }
    }

    /// Flush the open list and return every group list in order
    pub fn finish(mut self) -> Vec<Vec<u16>> {
        if self.current.len() == 2 {
            self.split_carry();
        }

        let list = std::mem::take(&mut self.current);
        self.emit(list);
        self.lists
    }

    fn split_carry(&mut self) {
        debug_assert_eq!(self.current.len(), 2);
        let carried = self.current[1];
        let first = self.current[0];
        self.current.clear();
        self.current.push(carried);
        self.emit(vec![first]);
    }

    fn emit(&mut self, list: Vec<u16>) {
        if list.is_empty() {
            return;
        }

        debug_assert!(list.len() != 2);
        debug_assert!(list.len() <= MAX_GROUPS_PER_OBJECT);
        debug_assert!(list
            .iter()
            .enumerate()
            .all(|(i, x)| !list[..i].contains(x)));
        self.lists.push(list);
    }
}

/// Pack a whole digit sequence
pub fn pack_groups(digits: &[u16]) -> Vec<Vec<u16>> {
    let mut packer = GroupPacker::with_capacity(digits.len());
    for &digit in digits {
        packer.push(digit);
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    fn valid(lists: &[Vec<u16>]) -> bool {
        lists.iter().all(|list| {
            !list.is_empty()
                && list.len() != 2
                && list.len() <= MAX_GROUPS_PER_OBJECT
                && list.iter().enumerate().all(|(i, x)| !list[..i].contains(x))
        })
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![1], vec![vec![1]])]
    #[case(vec![1, 2], vec![vec![1], vec![2]])]
    #[case(vec![1, 2, 3], vec![vec![1, 2, 3]])]
    #[case(vec![1, 1, 1], vec![vec![1], vec![1], vec![1]])]
    #[case(vec![4, 5, 4], vec![vec![4], vec![5], vec![4]])]
    #[case(vec![4, 5, 4, 6], vec![vec![4], vec![5, 4, 6]])]
    #[case(vec![4, 5, 5], vec![vec![4], vec![5], vec![5]])]
    #[case(vec![1, 2, 3, 1], vec![vec![1, 2, 3], vec![1]])]
    #[case(
        (1..=12).collect(),
        vec![(1..=10).collect::<Vec<u16>>(), vec![11], vec![12]]
    )]
    #[case(
        (1..=13).collect(),
        vec![(1..=10).collect::<Vec<u16>>(), vec![11, 12, 13]]
    )]
    fn test_pack_groups(#[case] digits: Vec<u16>, #[case] expected: Vec<Vec<u16>>) {
        assert_eq!(pack_groups(&digits), expected);
    }

    #[test]
    fn test_header_style_prefix() {
        // a typical small payload header followed by padding digits
        let lists = pack_groups(&[1, 27, 1, 1, 1, 1, 2]);
        assert!(valid(&lists));
        assert_eq!(lists.concat(), vec![1, 27, 1, 1, 1, 1, 2]);
    }

    #[quickcheck]
    fn packing_preserves_order_and_constraints(digits: Vec<u16>) -> bool {
        let digits: Vec<u16> = digits.into_iter().map(|x| x % 16 + 1).collect();
        let lists = pack_groups(&digits);
        valid(&lists) && lists.concat() == digits
    }
}
