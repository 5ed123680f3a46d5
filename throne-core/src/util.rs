//! Utilities for interaction of agents and environments.
use crate::{
    record::{RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;
use chrono::Local;
use log::info;

/// Run episodes with a policy and recorder.
///
/// The record of every tick is extended with the reward, the episode index and
/// the step count before it is written to `recorder`. The return value holds the
/// undiscounted return of each episode.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset(None)?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act);
            r_total += step.reward[0];

            record.insert("reward", RecordValue::Scalar(step.reward[0]));
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            record.insert("timestamp", RecordValue::DateTime(Local::now()));
            recorder.write(record);

            count_step += 1;
            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
        }

        info!(
            "Episode {}, {} steps, return = {}",
            episode, count_step, r_total
        );
        rs.push(r_total);
    }

    Ok(rs)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        record::{BufferedRecorder, Record},
        Act, DefaultEvaluator, Evaluator as _, Obs, Step,
    };
    use test_log::test;

    #[derive(Clone, Debug)]
    struct Countdown(usize);

    impl Obs for Countdown {
        fn dummy(_n: usize) -> Self {
            Self(0)
        }

        fn len(&self) -> usize {
            1
        }
    }

    #[derive(Clone, Debug)]
    struct Tick;

    impl Act for Tick {
        fn len(&self) -> usize {
            1
        }
    }

    /// Terminates after `length` ticks, rewarding 1 per tick.
    struct CountdownEnv {
        length: usize,
        left: usize,
        n_resets: usize,
    }

    impl Env for CountdownEnv {
        type Config = usize;
        type Obs = Countdown;
        type Act = Tick;
        type Info = ();

        fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
            Ok(Self {
                length: *config,
                left: *config,
                n_resets: 0,
            })
        }

        fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
            self.left -= 1;
            let done = if self.left == 0 { 1 } else { 0 };
            let step = Step::new(
                Countdown(self.left),
                a.clone(),
                vec![1.0],
                vec![done],
                vec![0],
                (),
                None,
            );
            (step, Record::empty())
        }

        fn reset(&mut self, _is_done: Option<&Vec<i8>>) -> Result<Self::Obs> {
            self.left = self.length;
            self.n_resets += 1;
            Ok(Countdown(self.left))
        }

        fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
            self.reset(None)
        }
    }

    struct TickPolicy;

    impl Policy<CountdownEnv> for TickPolicy {
        fn sample(&mut self, _obs: &Countdown) -> Tick {
            Tick
        }
    }

    #[test]
    fn test_eval_with_recorder_writes_every_tick() -> Result<()> {
        let mut env = CountdownEnv::build(&3, 0)?;
        let mut recorder = BufferedRecorder::new();
        let returns = eval_with_recorder(&mut env, &mut TickPolicy, 2, &mut recorder)?;

        assert_eq!(returns, vec![3.0, 3.0]);
        assert_eq!(recorder.len(), 6);
        let last = recorder.iter().last().unwrap();
        assert_eq!(last.get_scalar("episode")?, 1.0);
        assert_eq!(last.get_scalar("step")?, 2.0);
        Ok(())
    }

    #[test]
    fn test_step_with_reset_attaches_initial_observation() -> Result<()> {
        let mut env = CountdownEnv::build(&2, 0)?;
        env.reset(None)?;

        let (step, _) = env.step_with_reset(&Tick);
        assert!(!step.is_done());
        assert!(step.init_obs.is_none());

        let (step, _) = env.step_with_reset(&Tick);
        assert!(step.is_done());
        assert_eq!(step.init_obs.map(|o| o.0), Some(2));
        assert_eq!(env.n_resets, 2);
        Ok(())
    }

    #[test]
    fn test_default_evaluator_averages_returns() -> Result<()> {
        let mut evaluator = DefaultEvaluator::<CountdownEnv>::new(&4, 0, 3)?;
        let record = evaluator.evaluate(&mut TickPolicy)?;
        assert_eq!(record.get_scalar("Episode return")?, 4.0);
        assert_eq!(record.get_scalar("Episode length")?, 4.0);
        Ok(())
    }

    #[test]
    fn test_evaluator_from_built_env() -> Result<()> {
        let env = CountdownEnv::build(&2, 0)?;
        let mut evaluator = DefaultEvaluator::from_env(env, 5);
        let record = evaluator.evaluate(&mut TickPolicy)?;
        assert_eq!(record.get_scalar("Episode return")?, 2.0);
        assert_eq!(record.get_scalar("Episode length")?, 2.0);

        let mut evaluator = DefaultEvaluator::from_env(CountdownEnv::build(&2, 0)?, 0);
        let record = evaluator.evaluate(&mut TickPolicy)?;
        assert_eq!(record.get_scalar("Episode return")?, 0.0);
        Ok(())
    }
}
