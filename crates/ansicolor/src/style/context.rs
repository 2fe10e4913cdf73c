use crate::termco::ColorTier;
use crate::util::Environment;

/// The targeted display layer: Foreground or background.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The foreground or text layer.
    Foreground,
    /// The background layer.
    Background,
}

impl Layer {
    /// Determine whether this layer is the foreground.
    pub fn is_foreground(&self) -> bool {
        matches!(*self, Self::Foreground)
    }

    /// Determine the offset for this layer.
    ///
    /// The offset is added to the SGR parameter values for foreground colors
    /// and therefore zero for [`Layer::Foreground`].
    pub fn offset(&self) -> u8 {
        match *self {
            Self::Foreground => 0,
            Self::Background => 10,
        }
    }
}

fn is_teamcity_with_color(version: &str) -> bool {
    // TeamCity 9.x and later support ANSI colors.
    let mut charity = version.chars();
    let c1 = charity.next();
    let c2 = charity.next();

    c1.filter(|c| *c == '9')
        .and(c2.filter(|c| *c == '.'))
        .or(c1
            .filter(|c| c.is_ascii_digit() && *c != '0')
            .and(c2.filter(|c| c.is_ascii_digit()))
            .and(charity.next().filter(|c| *c == '.')))
        .is_some()
}

/// Determine the color tier from environment variables.
///
/// The primary sources are [NO_COLOR](https://no-color.org) and
/// [FORCE_COLOR](https://force-color.org), the secondary source is Chalk's
/// [supports-color](https://github.com/chalk/supports-color/blob/main/index.js).
/// `None` stands for plain text without escape sequences.
pub(crate) fn tier_from_environment<E: Environment>(env: &E, has_tty: bool) -> Option<ColorTier> {
    if env.is_non_empty("NO_COLOR") {
        return Some(ColorTier::None);
    } else if env.is_non_empty("FORCE_COLOR") {
        return Some(ColorTier::Colors16);
    } else if env.is_set("TF_BUILD") || env.is_set("AGENT_NAME") {
        // Must come before the TTY test.
        return Some(ColorTier::Colors16);
    } else if !has_tty || env.has_value("TERM", "dumb") {
        return None;
    } else if env.is_set("CI") {
        if env.is_set("GITHUB_ACTIONS") || env.is_set("GITEA_ACTIONS") {
            return Some(ColorTier::TrueColor);
        }

        let is_known = [
            "TRAVIS",
            "CIRCLECI",
            "APPVEYOR",
            "GITLAB_CI",
            "BUILDKITE",
            "DRONE",
        ]
        .iter()
        .any(|ci| env.is_set(ci))
            || env.has_value("CI_NAME", "codeship");

        return is_known.then_some(ColorTier::Colors16);
    }

    if let Some(teamcity) = env.text("TEAMCITY_VERSION") {
        return is_teamcity_with_color(&teamcity).then_some(ColorTier::Colors16);
    } else if env.has_value("COLORTERM", "truecolor") || env.has_value("TERM", "xterm-kitty") {
        return Some(ColorTier::TrueColor);
    } else if env.has_value("TERM_PROGRAM", "Apple_Terminal") {
        return Some(ColorTier::Colors256);
    } else if env.has_value("TERM_PROGRAM", "iTerm.app") {
        let is_v3 = env
            .text("TERM_PROGRAM_VERSION")
            .is_some_and(|version| version.starts_with("3."));
        return Some(if is_v3 {
            ColorTier::TrueColor
        } else {
            ColorTier::Colors256
        });
    }

    if let Some(mut term) = env.text("TERM") {
        term.make_ascii_lowercase();

        if term.ends_with("-256") || term.ends_with("-256color") {
            return Some(ColorTier::Colors256);
        } else if term.starts_with("screen")
            || term.starts_with("xterm")
            || term.starts_with("vt100")
            || term.starts_with("vt220")
            || term.starts_with("rxvt")
            || term == "color"
            || term == "ansi"
            || term == "cygwin"
            || term == "linux"
        {
            return Some(ColorTier::Colors16);
        }
    } else if env.is_set("COLORTERM") {
        return Some(ColorTier::Colors16);
    }

    None
}
