use crate::prelude_crate::*;
use colored::*;
use std::io::Write;
use std::time::Duration;

pub fn progress_bar(current: usize, total: usize) {
    let current = current + 1;
    let percentage = current as f64 / total as f64;
    let bar_length = 50;
    let filled_length = ((bar_length as f64 * percentage) as usize).min(bar_length);
    let completed = "█".repeat(filled_length);
    let remaining = "░".repeat(bar_length - filled_length);
    let bar = completed + &remaining;
    let percentage = percentage * 100.0;
    print!("\r{}", format!("{bar} {percentage:.2}%").green().bold());
    let _ = std::io::stdout().flush();
    if current == total {
        println!();
        println!();
    }
}

pub fn report_elapsed(label: &str, elapsed: Duration) {
    println!(
        "{}: {}\n",
        label.bold(),
        format!("{:.3} s", elapsed.as_secs_f64()).yellow().bold()
    );
}

/// Relative deviation of `value` from `reference`, in percent.
///
/// # Examples
/// ```
/// # use lbflow2d::io::relative_error;
/// assert!((relative_error(1.01, 1.0) - 1.0).abs() < 1e-12);
/// assert_eq!(relative_error(0.0, 0.0), 0.0);
/// ```
pub fn relative_error(value: Float, reference: Float) -> Float {
    if reference == 0.0 {
        return value.abs() * 100.0;
    }
    ((value - reference) / reference).abs() * 100.0
}

/// Prints the computed profile next to the analytic one and returns the largest relative
/// error in percent, ignoring the wall rows.
pub fn print_profile(computed: &[Float], analytic: &[Float]) -> Float {
    println!(
        "{:>4} {:>16} {:>16} {:>10}",
        "j".bold(),
        "lb".bold(),
        "analytic".bold(),
        "error %".bold()
    );
    let nj = computed.len().min(analytic.len());
    let mut max_error: Float = 0.0;
    for (j, (&u, &u_analytic)) in computed.iter().zip(analytic.iter()).enumerate() {
        let error = relative_error(u, u_analytic);
        let is_wall = j == 0 || j + 1 == nj;
        let error_text = format!("{error:>10.4}");
        let error_text = if is_wall {
            error_text.dimmed()
        } else {
            max_error = max_error.max(error);
            error_text.normal()
        };
        println!("{j:>4} {u:>16.8e} {u_analytic:>16.8e} {error_text}");
    }
    println!();
    max_error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(-0.995, -1.0) - 0.5).abs() < 1e-12);
        assert!((relative_error(2.0, 0.0) - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_print_profile_skips_walls() {
        let analytic = [1.0, 2.0, 2.0, 1.0];
        let computed = [2.0, 2.02, 1.99, 0.0];

        let max_error = print_profile(&computed, &analytic);

        assert!((max_error - 1.0).abs() < 1e-12);
    }
}
