//! Stagger and emphasis over collections of elements.

use crate::director::Director;
use crate::signal::Signal;

/// Run each element's director to completion, then wait `delay` before the next.
///
/// The wait after the last element is kept, so the whole sequence lasts
/// `sum(element) + len * delay`.
pub fn stagger_sequential<T>(
    label: impl Into<String>,
    elements: &[T],
    delay: f32,
    mut per_element: impl FnMut(usize, &T) -> Director,
) -> Director {
    elements
        .iter()
        .enumerate()
        .fold(Director::new(label), |d, (i, element)| {
            d.run(per_element(i, element)).wait(delay)
        })
}

/// Run `f` on `elements[index]`; an out-of-range index yields an empty director.
pub fn emphasize<T>(
    label: impl Into<String>,
    elements: &[T],
    index: usize,
    f: impl FnOnce(&T) -> Director,
) -> Director {
    let director = Director::new(label);
    match elements.get(index) {
        Some(element) => director.run(f(element)),
        None => {
            log::debug!(
                "emphasize index {index} out of range for {} elements",
                elements.len()
            );
            director
        }
    }
}

/// Scale to `peak` over `up` seconds, then back to `rest` over `down` seconds.
pub fn pulse(signal: Signal<f32>, peak: f32, up: f32, rest: f32, down: f32) -> Director {
    Director::new("pulse")
        .tween(signal, peak, up)
        .tween(signal, rest, down)
}
