/// Opacity and scale of one revealed word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordStyle {
    pub opacity: f32,
    pub scale: f32,
}

/// Threshold reveal: each word fades and grows in over `ramp` progress,
/// starting at its own threshold.
#[derive(Debug, Clone)]
pub struct WordReveal {
    words: Vec<String>,
    thresholds: Vec<f32>,
    ramp: f32,
    base_scale: f32,
    spread: f32,
}

impl WordReveal {
    pub fn new(words: Vec<String>, thresholds: Vec<f32>, ramp: f32) -> Self {
        Self {
            words,
            thresholds,
            ramp: ramp.max(f32::EPSILON),
            base_scale: 0.96,
            spread: 0.04,
        }
    }

    pub fn with_scale(mut self, base_scale: f32, spread: f32) -> Self {
        self.base_scale = base_scale;
        self.spread = spread;
        self
    }

    /// Reveal amount of the word at `index`, in `[0, 1]`.
    pub fn amount(&self, index: usize, progress: f32) -> f32 {
        let Some(threshold) = self.thresholds.get(index) else {
            return 0.0;
        };
        ((progress - threshold) / self.ramp).clamp(0.0, 1.0)
    }

    pub fn styles(&self, progress: f32) -> Vec<WordStyle> {
        (0..self.words.len())
            .map(|i| {
                let t = self.amount(i, progress);
                WordStyle {
                    opacity: t,
                    scale: self.base_scale + self.spread * t,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn reveal() -> WordReveal {
        let words = ["the", "quick", "brown", "fox"].map(String::from).to_vec();
        WordReveal::new(words, vec![0.0, 0.25, 0.5, 0.75], 0.12)
    }

    #[test]
    fn partial_reveal_at_thirty_percent() {
        let styles = reveal().styles(0.30);
        assert_eq!(styles[0].opacity, 1.0);
        assert!((styles[1].opacity - 0.05 / 0.12).abs() < 1e-4);
        assert_eq!(styles[2].opacity, 0.0);
        assert_eq!(styles[3].opacity, 0.0);
        assert!((styles[0].scale - 1.0).abs() < 1e-6);
        assert!((styles[3].scale - 0.96).abs() < 1e-6);
    }

    #[test]
    fn opacity_bounded_and_non_decreasing() {
        let reveal = reveal();
        let mut rng = StdRng::seed_from_u64(3);
        let mut samples: Vec<f32> = (0..400).map(|_| rng.gen_range(0.0..=1.0)).collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut previous = reveal.styles(0.0);
        for p in samples {
            let styles = reveal.styles(p);
            for (now, before) in styles.iter().zip(&previous) {
                assert!((0.0..=1.0).contains(&now.opacity));
                assert!(now.opacity >= before.opacity);
            }
            previous = styles;
        }
    }

    #[test]
    fn last_word_lands_at_threshold_plus_ramp() {
        let reveal = reveal();
        assert!(reveal.amount(3, 0.86) < 1.0);
        assert!(reveal.styles(0.87).iter().all(|w| w.opacity == 1.0));
        assert!(reveal.styles(1.0).iter().all(|w| w.opacity == 1.0));
    }

    #[test]
    fn no_words_means_no_styles() {
        let reveal = WordReveal::new(Vec::new(), Vec::new(), 0.12);
        assert!(reveal.styles(0.5).is_empty());
    }

    #[test]
    fn missing_threshold_stays_hidden() {
        let reveal = WordReveal::new(vec!["solo".into(), "extra".into()], vec![0.0], 0.1);
        assert_eq!(reveal.amount(1, 1.0), 0.0);
    }
}
