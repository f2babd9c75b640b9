use console::{style, Term};
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

const TAGLINE: &str = "API Defender Scan Console";

/// Print the startup banner: FIGlet wordmark, version line, tagline.
pub fn show_splash() {
    let term = Term::stdout();
    let (_, term_cols) = term.size();
    let term_w = term_cols as usize;

    let center = |text_w: usize| -> String {
        if term_w > text_w + 4 {
            " ".repeat((term_w - text_w) / 2)
        } else {
            "  ".to_string()
        }
    };

    let palette = Palette::from_hex(&[
        "#AFD7FF", // pale sky
        "#5FAFFF", // azure core
        "#5F5FD7", // indigo mid
        "#3A3A80", // deep slate
    ]);
    let gradient = Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal);

    let banner_text = match Banner::new("DEFENDER") {
        Ok(b) => b
            .gradient(gradient)
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .color_mode(ColorMode::TrueColor)
            .width(term_w)
            .render(),
        Err(_) => {
            // Fallback if FIGlet font fails
            format!("{}{}\n", center(8), style("DEFENDER").cyan().bold())
        }
    };

    println!();
    print!("{}", banner_text);

    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let version_str = format!("v{} ({})", version, git_hash);
    println!("{}{}", center(version_str.len()), style(version_str).dim());
    println!("{}{}", center(TAGLINE.len()), style(TAGLINE).cyan());
    println!();
}
