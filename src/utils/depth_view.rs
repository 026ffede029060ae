use crate::optim::{AigNetwork, DepthNetwork};
use crate::utils::{compute_levels, compute_reverse_levels, ReverseLevels};
use crate::{Network, Signal};

/// Level and critical path view of a network
///
/// Wraps a network for the duration of an optimization and answers level queries.
/// Levels are only valid after [`DepthView::update_levels`]; every substitution through
/// the view makes them stale.
///
/// A node is on the critical path when it reaches an output and the longest path going
/// through it is as long as the network's depth.
#[derive(Debug)]
pub struct DepthView<'a> {
    ntk: &'a mut Network,
    pi_levels: Option<Vec<u32>>,
    levels: Vec<u32>,
    reverse_levels: ReverseLevels,
    depth: u32,
}

impl<'a> DepthView<'a> {
    /// Wrap a network, with all primary inputs at level 0
    pub fn new(ntk: &'a mut Network) -> Self {
        let mut view = DepthView {
            ntk,
            pi_levels: None,
            levels: Vec::new(),
            reverse_levels: ReverseLevels::default(),
            depth: 0,
        };
        view.update_levels();
        view
    }

    /// Wrap a network, with an arrival level for each primary input
    pub fn with_input_levels(ntk: &'a mut Network, pi_levels: Vec<u32>) -> Self {
        assert_eq!(
            pi_levels.len(),
            ntk.nb_inputs(),
            "Number of PI levels config must match number of PIs"
        );
        let mut view = DepthView {
            ntk,
            pi_levels: Some(pi_levels),
            levels: Vec::new(),
            reverse_levels: ReverseLevels::default(),
            depth: 0,
        };
        view.update_levels();
        view
    }

    /// Access the underlying network
    pub fn network(&self) -> &Network {
        &*self.ntk
    }

    fn signal_level(&self, s: Signal) -> u32 {
        if s.is_input() {
            self.pi_levels
                .as_ref()
                .map(|levels| levels[s.input() as usize])
                .unwrap_or(0)
        } else if s.is_var() {
            self.levels[s.var() as usize]
        } else {
            0
        }
    }
}

impl AigNetwork for DepthView<'_> {
    type Node = Signal;
    type Signal = Signal;

    fn foreach_gate(&self, f: impl FnMut(Signal)) {
        self.ntk.foreach_gate(f)
    }

    fn foreach_fanin(&self, n: Signal, f: impl FnMut(Signal)) {
        self.ntk.foreach_fanin(n, f)
    }

    fn fanin_size(&self, n: Signal) -> usize {
        self.ntk.fanin_size(n)
    }

    fn get_node(&self, s: Signal) -> Signal {
        s.without_inversion()
    }

    fn is_complemented(&self, s: Signal) -> bool {
        s.is_inverted()
    }

    fn create_and(&mut self, a: Signal, b: Signal) -> Signal {
        self.ntk.and(a, b)
    }

    fn substitute_node(&mut self, n: Signal, s: Signal) {
        AigNetwork::substitute_node(&mut *self.ntk, n, s)
    }

    fn find_non_and_gate(&self) -> Option<Signal> {
        self.ntk.find_non_and_gate()
    }
}

impl DepthNetwork for DepthView<'_> {
    fn level(&self, n: Signal) -> u32 {
        self.signal_level(n)
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn is_on_critical_path(&self, n: Signal) -> bool {
        let Some(rlevel) = self.reverse_levels.get(n) else {
            return false;
        };
        if n.is_var() {
            self.signal_level(n) + rlevel == self.depth + 1
        } else {
            self.signal_level(n) + rlevel == self.depth
        }
    }

    fn update_levels(&mut self) {
        self.levels = compute_levels(self.ntk, self.pi_levels.as_deref());
        self.reverse_levels = compute_reverse_levels(self.ntk);
        self.depth = (0..self.ntk.nb_outputs())
            .map(|po| self.signal_level(self.ntk.output(po)))
            .max()
            .unwrap_or(0);
    }
}
