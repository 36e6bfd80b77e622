//! Live population bookkeeping: fitness accounting and attrition.
//!
//! Removal is mark-then-compact: removing by index mid-scan would skip the
//! element after each removal, so members are marked during the scan and
//! compacted once afterwards. Same-tick multiple removals stay safe.

use crate::bird::Bird;
use crate::config::BirdConfig;
use crate::controller::{Controller, Observation};
use rayon::prelude::*;

/// One live triple: bird, its controller, and its accumulated fitness.
pub struct Member {
    pub bird: Bird,
    pub controller: Box<dyn Controller>,
    pub fitness: f32,
}

/// The set of concurrently live members, in stable insertion order.
pub struct Population {
    members: Vec<Member>,
}

impl Population {
    /// Spawn one bird per controller at the configured spawn point.
    pub fn new(controllers: Vec<Box<dyn Controller>>, config: &BirdConfig) -> Self {
        let members = controllers
            .into_iter()
            .map(|controller| Member {
                bird: Bird::new(config),
                controller,
                fitness: 0.0,
            })
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Member] {
        &mut self.members
    }

    /// First member in insertion order; drives target-obstacle selection.
    pub fn first(&self) -> Option<&Member> {
        self.members.first()
    }

    /// Parallel decide phase. Controllers are pure functions of the
    /// observation, so this is the only phase that fans out across threads;
    /// all mutation happens sequentially afterwards.
    pub fn decide<F>(&self, observe: F) -> Vec<f32>
    where
        F: Fn(&Bird) -> Observation + Sync,
    {
        self.members
            .par_iter()
            .map(|m| m.controller.decide(&observe(&m.bird)))
            .collect()
    }

    /// Continuous survival reward for every live member.
    pub fn reward_all(&mut self, amount: f32) {
        for m in &mut self.members {
            m.fitness += amount;
        }
    }

    /// Pass bonus for members not marked for removal this tick.
    pub fn bonus_survivors(&mut self, amount: f32, doomed: &[bool]) {
        for (m, &dead) in self.members.iter_mut().zip(doomed) {
            if !dead {
                m.fitness += amount;
            }
        }
    }

    /// Collision penalty for one member.
    pub fn penalize(&mut self, index: usize, amount: f32) {
        self.members[index].fitness -= amount;
    }

    /// Compact marked members out, reporting final fitness to each removed
    /// controller. Returns how many were removed.
    pub fn retire_marked(&mut self, doomed: &[bool]) -> usize {
        debug_assert_eq!(doomed.len(), self.members.len());
        let mut index = 0;
        let mut removed = 0;
        self.members.retain_mut(|m| {
            let keep = !doomed[index];
            index += 1;
            if !keep {
                m.controller.report_fitness(m.fitness);
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Retire everyone still alive (epoch cut short by the harness).
    pub fn retire_all(&mut self) -> usize {
        let removed = self.members.len();
        for m in &mut self.members {
            m.controller.report_fitness(m.fitness);
        }
        self.members.clear();
        removed
    }
}
