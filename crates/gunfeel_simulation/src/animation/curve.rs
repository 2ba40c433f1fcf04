//! Response curve — time-keyed кривая для recoil decay и weapon parts
//!
//! Модель:
//! - Keyframe: (time, value, in_tangent, out_tangent)
//! - Между ключами: cubic Hermite с тангенсами сегмента
//! - Вне диапазона: clamp к крайнему значению
//! - Бесконечный тангенс = step (держим левое значение)

use serde::{Deserialize, Serialize};

/// Один ключ кривой
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Ключ с нулевыми тангенсами (плоский вход/выход)
    pub const fn flat(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    /// time и value конечны (тангенсы могут быть бесконечными: step)
    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

/// Кривая отклика (shared read-only между всеми RecoilEvent одного оружия)
///
/// Инвариант: keys отсортированы по time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct ResponseCurve {
    keys: Vec<Keyframe>,
}

impl From<Vec<Keyframe>> for ResponseCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl From<ResponseCurve> for Vec<Keyframe> {
    fn from(curve: ResponseCurve) -> Self {
        curve.keys
    }
}

impl ResponseCurve {
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Smooth S-curve между двумя точками (нулевые тангенсы)
    pub fn ease_in_out(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        Self::new(vec![
            Keyframe::flat(time_start, value_start),
            Keyframe::flat(time_end, value_end),
        ])
    }

    /// Первый ключ с нечисловым time/value (невалидная кривая из конфига)
    pub fn first_non_finite(&self) -> Option<&Keyframe> {
        self.keys.iter().find(|key| !key.is_finite())
    }

    /// Один ключ в t = 0 (duration 0, событие живёт один кадр)
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::flat(0.0, value)])
    }

    /// Ломаная: тангенсы = наклоны соседних сегментов
    pub fn linear(points: &[(f32, f32)]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let slope = |a: (f32, f32), b: (f32, f32)| {
            let span = b.0 - a.0;
            if span > 0.0 {
                (b.1 - a.1) / span
            } else {
                0.0
            }
        };

        let keys = sorted
            .iter()
            .enumerate()
            .map(|(i, &(time, value))| {
                let in_tangent = if i > 0 { slope(sorted[i - 1], (time, value)) } else { 0.0 };
                let out_tangent = sorted
                    .get(i + 1)
                    .map(|&next| slope((time, value), next))
                    .unwrap_or(0.0);
                Keyframe {
                    time,
                    value,
                    in_tangent,
                    out_tangent,
                }
            })
            .collect();

        Self { keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Длительность = максимальное время ключа (0 для пустой кривой)
    pub fn duration(&self) -> f32 {
        self.keys.last().map(|key| key.time.max(0.0)).unwrap_or(0.0)
    }

    /// Сэмплирование кривой в момент `time`
    pub fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // Первый ключ строго правее time (существует: time < last.time)
        let right = self.keys.partition_point(|key| key.time <= time);
        let a = &self.keys[right - 1];
        let b = &self.keys[right];

        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        if !a.out_tangent.is_finite() || !b.in_tangent.is_finite() {
            return a.value;
        }

        let s = (time - a.time) / span;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * a.value + h10 * span * a.out_tangent + h01 * b.value + h11 * span * b.in_tangent
    }
}
