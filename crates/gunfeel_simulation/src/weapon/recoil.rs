//! Recoil events — короткоживущие импульсы от выстрелов
//!
//! Каждый выстрел = один RecoilEvent со ссылкой на shared кривую оружия.
//! Чтение значения продвигает время события, поэтому sampling явный:
//! `advance(dt)` вызывается ровно один раз за кадр (из RecoilStack::drain).

use std::sync::Arc;

use crate::animation::ResponseCurve;

#[derive(Debug, Clone)]
pub struct RecoilEvent {
    elapsed: f32,
    duration: f32,
    curve: Arc<ResponseCurve>,
}

impl RecoilEvent {
    pub fn new(curve: Arc<ResponseCurve>) -> Self {
        Self {
            elapsed: 0.0,
            duration: curve.duration(),
            curve,
        }
    }

    /// Продвинуть время на dt, затем сэмплировать кривую
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.curve.evaluate(self.elapsed)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Живые recoil события одного оружия (порядок не важен)
#[derive(Debug, Clone, Default)]
pub struct RecoilStack {
    events: Vec<RecoilEvent>,
}

impl RecoilStack {
    pub fn push(&mut self, event: RecoilEvent) {
        self.events.push(event);
    }

    /// Sample pass по всем событиям, затем compaction завершённых
    ///
    /// Событие, завершившееся в этом кадре, ещё вносит свой последний сэмпл.
    pub fn drain(&mut self, dt: f32) -> f32 {
        let total: f32 = self.events.iter_mut().map(|event| event.advance(dt)).sum();
        self.events.retain(|event| !event.is_finished());
        total
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Arc<ResponseCurve> {
        Arc::new(ResponseCurve::linear(&[(0.0, 0.0), (0.1, 1.0), (0.3, 0.0)]))
    }

    #[test]
    fn test_duration_is_last_key_time() {
        let event = RecoilEvent::new(triangle());
        assert_eq!(event.duration(), 0.3);
        assert!(!event.is_finished());
    }

    #[test]
    fn test_advance_then_sample() {
        let mut event = RecoilEvent::new(triangle());
        let value = event.advance(0.05);

        assert!((value - 0.5).abs() < 1e-5);
        assert_eq!(event.elapsed(), 0.05);
    }

    #[test]
    fn test_event_removed_exactly_when_finished() {
        let mut stack = RecoilStack::default();
        stack.push(RecoilEvent::new(Arc::new(ResponseCurve::linear(&[(0.0, 0.0), (0.5, 1.0)]))));

        stack.drain(0.25);
        assert_eq!(stack.len(), 1);

        // elapsed = 0.5 = duration → последний сэмпл учтён, событие удалено
        let last = stack.drain(0.25);
        assert!((last - 1.0).abs() < 1e-5);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_drain_sums_independent_samples() {
        let curve = triangle();
        let mut stack = RecoilStack::default();
        let mut older = RecoilEvent::new(curve.clone());
        let mut newer = RecoilEvent::new(curve.clone());

        stack.push(RecoilEvent::new(curve.clone()));
        stack.drain(0.04);
        older.advance(0.04);

        stack.push(RecoilEvent::new(curve));
        let total = stack.drain(0.04);
        let expected = older.advance(0.04) + newer.advance(0.04);

        assert!((total - expected).abs() < 1e-6);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_empty_curve_event_lives_one_frame() {
        let mut stack = RecoilStack::default();
        stack.push(RecoilEvent::new(Arc::new(ResponseCurve::default())));

        assert_eq!(stack.drain(0.016), 0.0);
        assert!(stack.is_empty());
    }
}
