use crate::scene::model::{RotationDirection, SceneObject};

/// Build the natural-language prompt accompanying a task.
///
/// Deterministic collaborator: the rendering core passes the object list,
/// direction, and degrees through unchanged and treats the result as opaque.
pub fn describe_scene(
    objects: &[SceneObject],
    direction: RotationDirection,
    degrees: u32,
) -> String {
    let listing = object_listing(objects);
    if objects.len() == 1 {
        format!(
            "The image shows {listing}. Rotate it {degrees} degrees {} about its own center, \
             keeping its position fixed.",
            direction.name()
        )
    } else {
        format!(
            "The image shows {listing}. Rotate each object {degrees} degrees {} about its own \
             center, keeping every object in place.",
            direction.name()
        )
    }
}

fn object_listing(objects: &[SceneObject]) -> String {
    let names: Vec<String> = objects
        .iter()
        .map(|o| format!("{} {} {}", article(o.color.name()), o.color.name(), o.shape.name()))
        .collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
