use std::fmt;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Location of one input in the elementary effects plane
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct EffectPoint {
    /// Input name
    pub label: String,
    /// Mean of the elementary effects (absolute ones or not depending on the graph)
    pub mean: f64,
    /// Standard deviation of the elementary effects
    pub std: f64,
}

/// Data of the Morris screening plot: each input is drawn at
/// `(mean of elementary effects, standard deviation of elementary effects)`.
/// Inputs with negligible effects gather near the origin, inputs with
/// linear effects along the horizontal axis and inputs involved in
/// interactions or non-linear effects get large standard deviations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ElementaryEffectsGraph {
    /// Graph title
    pub title: String,
    /// Horizontal axis label
    pub x_label: String,
    /// Vertical axis label
    pub y_label: String,
    /// One point per input
    pub points: Vec<EffectPoint>,
}

impl ElementaryEffectsGraph {
    /// Sets the graph title
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Renames the inputs, `labels` should have one name per input
    pub fn labels(mut self, labels: &[&str]) -> Self {
        for (point, label) in self.points.iter_mut().zip(labels) {
            point.label = label.to_string();
        }
        self
    }

    /// Inputs sorted by decreasing mean, most influential first
    pub fn ranking(&self) -> Vec<&EffectPoint> {
        let mut ranked: Vec<&EffectPoint> = self.points.iter().collect();
        ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
        ranked
    }

    /// JSON representation of the graph, to be rendered by plotting front ends
    #[cfg(feature = "serializable")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for ElementaryEffectsGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{:>10} {:>14} {:>14}", "input", self.x_label, self.y_label)?;
        for p in self.points.iter() {
            writeln!(f, "{:>10} {:>14.6} {:>14.6}", p.label, p.mean, p.std)?;
        }
        Ok(())
    }
}
