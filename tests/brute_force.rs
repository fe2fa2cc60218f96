mod common;

use common::{arb_clauses, brute_force_count, cnf};
use dualcount::sat::configs::{Phase, SolverOptions};
use dualcount::{SATISFIABLE, Solver, UNSATISFIABLE};
use proptest::prelude::*;

const VARS: i32 = 8;

fn arb_options() -> impl Strategy<Value = SolverOptions> {
    (
        any::<bool>(),
        0usize..4,
        any::<bool>(),
        0u32..3,
        0u32..3,
        any::<bool>(),
        any::<bool>(),
        (0u64..4, 0u64..100),
    )
        .prop_map(
            |(block, blocklimit, discount, bump, phase, relevantfirst, reusetrail, (restartint, seed))| {
                SolverOptions {
                    block,
                    blocklimit,
                    discount,
                    bump,
                    phase: Phase::from(phase),
                    relevantfirst,
                    reusetrail,
                    restartint,
                    seed,
                    keepglue: 1,
                    keepsize: 2,
                    reduceinit: 4,
                    reduceinc: 2,
                    subsumelimit: 5,
                    ..SolverOptions::default()
                }
            },
        )
}

fn arb_relevant() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1..=VARS.unsigned_abs(), 0..=VARS as usize)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn count_matches_brute_force(
        clauses in arb_clauses(VARS, 24),
        relevant in arb_relevant(),
        options in arb_options(),
    ) {
        let mut input = cnf(&clauses);
        input.num_vars = VARS.unsigned_abs();
        let expected = brute_force_count(&clauses, input.num_vars, &relevant);

        let count = Solver::projected(input, Some(&relevant))
            .unwrap()
            .with_options(options)
            .primal_count()
            .unwrap();
        prop_assert_eq!(count.to_u64(), Some(expected));
    }

    #[test]
    fn sat_agrees_with_count(clauses in arb_clauses(VARS, 32), options in arb_options()) {
        let mut input = cnf(&clauses);
        input.num_vars = VARS.unsigned_abs();
        let models = brute_force_count(&clauses, input.num_vars, &[]);

        let result = Solver::projected(input, None)
            .unwrap()
            .with_options(options)
            .primal_sat()
            .unwrap();
        let expected = if models > 0 { SATISFIABLE } else { UNSATISFIABLE };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn retraction_strategies_agree(clauses in arb_clauses(VARS, 20), seed in 0u64..50) {
        let mut input = cnf(&clauses);
        input.num_vars = VARS.unsigned_abs();
        let relevant = [1, 2, 3, 4, 5];
        let strategies = [
            SolverOptions { blocklimit: 0, ..SolverOptions::default() },
            SolverOptions { block: false, ..SolverOptions::default() },
            SolverOptions { block: false, discount: false, ..SolverOptions::default() },
            SolverOptions { block: false, discountmax: 1, ..SolverOptions::default() },
            SolverOptions { blocklimit: 2, ..SolverOptions::default() },
        ];
        let counts: Vec<_> = strategies
            .into_iter()
            .map(|options| {
                Solver::projected(input.clone(), Some(&relevant[..]))
                    .unwrap()
                    .with_options(SolverOptions { seed, phase: Phase::Random, ..options })
                    .primal_count()
                    .unwrap()
            })
            .collect();
        for count in &counts[1..] {
            prop_assert_eq!(count, &counts[0]);
        }
    }
}
