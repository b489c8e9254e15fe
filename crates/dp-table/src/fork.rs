//! The fork arena and the order in which philosophers pick forks up.
//!
//! # Acquisition order
//!
//! Philosopher `p` (1-based) sits between fork `p - 1` on its left and fork
//! `p mod N` on its right.  If everybody took the left fork first, N
//! philosophers could each hold one fork and wait forever for the next.
//! Parity breaks the cycle: even philosophers go left-then-right, odd ones
//! right-then-left, so the two philosophers sharing a fork never request
//! their pairs in the same rotational direction and the "waits for" graph
//! between forks stays acyclic for every N ≥ 2.
//!
//! With one philosopher both sides are the same fork; [`grip`] reports
//! [`Grip::Lone`] so the caller never locks a mutex it already holds.

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use dp_core::{ForkId, PhilosopherId};

// ── Acquisition order ─────────────────────────────────────────────────────────

/// The fork on `philosopher`'s left.
#[inline]
pub fn left_fork(philosopher: PhilosopherId, _count: u32) -> ForkId {
    ForkId(philosopher.0 - 1)
}

/// The fork on `philosopher`'s right (wraps around the ring).
#[inline]
pub fn right_fork(philosopher: PhilosopherId, count: u32) -> ForkId {
    ForkId(philosopher.0 % count)
}

/// Which forks a philosopher takes, in order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Grip {
    /// Only one fork exists; the philosopher can hold it but never eat.
    Lone(ForkId),
    /// Take `first`, report it, then take `second`.
    Pair { first: ForkId, second: ForkId },
}

/// Acquisition order for `philosopher` at a table of `count`.
pub fn grip(philosopher: PhilosopherId, count: u32) -> Grip {
    let left = left_fork(philosopher, count);
    let right = right_fork(philosopher, count);
    if left == right {
        Grip::Lone(left)
    } else if philosopher.is_even() {
        Grip::Pair { first: left, second: right }
    } else {
        Grip::Pair { first: right, second: left }
    }
}

// ── Forks ─────────────────────────────────────────────────────────────────────

struct Fork {
    lock: Mutex<()>,
}

/// Proof that a fork is held.  Dropping it puts the fork back on the table.
pub struct ForkGuard<'a> {
    fork:   ForkId,
    _guard: MutexGuard<'a, ()>,
}

impl ForkGuard<'_> {
    pub fn fork(&self) -> ForkId {
        self.fork
    }
}

/// One lock per ring position, indexed by [`ForkId`].
pub struct Forks {
    forks: Vec<Fork>,
}

impl Forks {
    pub fn new(count: u32) -> Self {
        let forks = (0..count).map(|_| Fork { lock: Mutex::new(()) }).collect();
        Self { forks }
    }

    /// Block until `fork` is free, then hold it.
    ///
    /// A poisoned fork (its previous holder panicked mid-meal) is still a
    /// perfectly good fork; the guard is recovered rather than propagated.
    pub fn take(&self, fork: ForkId) -> ForkGuard<'_> {
        let guard = self.forks[fork.index()]
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        ForkGuard { fork, _guard: guard }
    }

    /// Take `fork` only if nobody holds it.
    pub fn try_take(&self, fork: ForkId) -> Option<ForkGuard<'_>> {
        match self.forks[fork.index()].lock.try_lock() {
            Ok(guard)                          => Some(ForkGuard { fork, _guard: guard }),
            Err(TryLockError::Poisoned(p))     => Some(ForkGuard { fork, _guard: p.into_inner() }),
            Err(TryLockError::WouldBlock)      => None,
        }
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }
}
