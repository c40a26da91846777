//! Interception predicates: which paths are images, which models need a
//! vision proxy.  Both are pure; callers AND them together to decide
//! whether a read should be redirected.

/// Image formats the vision CLI accepts.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Models that cannot accept image input and must be proxied.
const NON_VISION_MODELS: &[&str] = &["glm-4.7", "glm-4.6", "glm-4.5", "glm-4.5-air"];

/// True iff the path ends in a supported image extension (case-insensitive).
/// Paths with no extension yield false.
pub fn is_supported_image(path: &str) -> bool {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// True iff the active model is known to lack vision support.  An absent
/// model id means pass-through, not proxying.
pub fn requires_vision_proxy(model: Option<&str>) -> bool {
    match model {
        Some(m) => NON_VISION_MODELS.contains(&m),
        None => false,
    }
}
