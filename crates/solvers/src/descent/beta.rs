use std::fmt;

use nalgebra::DVector;

/// Lower bound parameter of the Hager–Zhang formula.
const HZ_ETA: f64 = 0.01;

/// Formulas for the nonlinear conjugate gradient coefficient `beta`.
///
/// The next direction is `d = -g + beta * d_prev`. With `y = g - g_prev`:
///
/// | variant | formula |
/// |---|---|
/// | `FletcherReeves` | `g·g / g_prev·g_prev` |
/// | `PolakRibiere` | `max(0, g·y / g_prev·g_prev)` |
/// | `HestenesStiefel` | `max(0, g·y / d_prev·y)` |
/// | `ConjugateDescent` | `-g·g / d_prev·g_prev` |
/// | `LiuStorey` | `max(0, -g·y / d_prev·g_prev)` |
/// | `DaiYuan` | `g·g / d_prev·y` |
/// | `HagerZhang` | the N+ formula of CG_DESCENT |
/// | `DaiYuanConjugateDescent` | `g·g / max(d_prev·y, -d_prev·g_prev)` |
/// | `DaiYuanHestenesStiefel` | `max(0, min(DY, HS))` |
/// | `FletcherReevesPolakRibiere` | PR clipped to `[-FR, FR]` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Beta {
    FletcherReeves,
    PolakRibiere,
    HestenesStiefel,
    ConjugateDescent,
    LiuStorey,
    DaiYuan,
    HagerZhang,
    DaiYuanConjugateDescent,
    DaiYuanHestenesStiefel,
    FletcherReevesPolakRibiere,
}

impl Beta {
    /// Every formula.
    #[must_use]
    pub fn all() -> [Self; 10] {
        [
            Self::FletcherReeves,
            Self::PolakRibiere,
            Self::HestenesStiefel,
            Self::ConjugateDescent,
            Self::LiuStorey,
            Self::DaiYuan,
            Self::HagerZhang,
            Self::DaiYuanConjugateDescent,
            Self::DaiYuanHestenesStiefel,
            Self::FletcherReevesPolakRibiere,
        ]
    }

    /// The short name used in method identifiers (`cgd-<id>`).
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::FletcherReeves => "fr",
            Self::PolakRibiere => "pr",
            Self::HestenesStiefel => "hs",
            Self::ConjugateDescent => "cd",
            Self::LiuStorey => "ls",
            Self::DaiYuan => "dy",
            Self::HagerZhang => "n",
            Self::DaiYuanConjugateDescent => "dycd",
            Self::DaiYuanHestenesStiefel => "dyhs",
            Self::FletcherReevesPolakRibiere => "frpr",
        }
    }

    /// Computes `beta` from the previous gradient and direction and the
    /// current gradient.
    #[must_use]
    pub fn value(&self, pg: &DVector<f64>, pd: &DVector<f64>, g: &DVector<f64>) -> f64 {
        let y = g - pg;

        let fr = || g.norm_squared() / pg.norm_squared();
        let pr = || g.dot(&y) / pg.norm_squared();
        let hs = || g.dot(&y) / pd.dot(&y);
        let dy = || g.norm_squared() / pd.dot(&y);

        match self {
            Self::FletcherReeves => fr(),
            Self::PolakRibiere => pr().max(0.0),
            Self::HestenesStiefel => hs().max(0.0),
            Self::ConjugateDescent => -g.norm_squared() / pd.dot(pg),
            Self::LiuStorey => (-g.dot(&y) / pd.dot(pg)).max(0.0),
            Self::DaiYuan => dy(),
            Self::HagerZhang => {
                let dy = pd.dot(&y);
                let beta = (&y - pd * (2.0 * y.norm_squared() / dy)).dot(g) / dy;
                let eta = -1.0 / (pd.norm() * HZ_ETA.min(pg.norm()));
                beta.max(eta)
            }
            Self::DaiYuanConjugateDescent => g.norm_squared() / pd.dot(&y).max(-pd.dot(pg)),
            Self::DaiYuanHestenesStiefel => dy().min(hs()).max(0.0),
            Self::FletcherReevesPolakRibiere => {
                // Comparisons rather than `clamp`, which panics on a NaN bound.
                let (fr, pr) = (fr(), pr());
                if pr < -fr {
                    -fr
                } else if pr.abs() <= fr {
                    pr
                } else {
                    fr
                }
            }
        }
    }
}

impl fmt::Display for Beta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
