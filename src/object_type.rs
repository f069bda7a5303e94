//! Object-type classification for project assets.
//!
//! This module maps asset paths to semantic object types (Material, Prefab,
//! Script, ...) using the file extension, or directory-kind for folders.
//! Every type except `Folder` is defined by a fixed, case-insensitive
//! extension set.
//!
//! # Examples
//!
//! ```
//! use nametidy::object_type::{ObjectType, TypeClassifier};
//!
//! let classifier = TypeClassifier::default();
//! assert_eq!(classifier.extension_to_type("mat"), Some(ObjectType::Material));
//! assert_eq!(classifier.extension_to_type("PNG"), Some(ObjectType::Sprite));
//! assert_eq!(classifier.extension_to_type("xyz"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Semantic type of a project asset.
///
/// The set is closed: a rule document naming anything outside it fails to
/// deserialize. Serde labels match the human-readable names shown in reports
/// and accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// A directory anywhere under the asset root.
    Folder,
    #[serde(rename = "Animation Clip")]
    AnimationClip,
    #[serde(rename = "Audio Clip")]
    AudioClip,
    #[serde(rename = "Audio Mixer")]
    AudioMixer,
    #[serde(rename = "Compute Shader")]
    ComputeShader,
    Font,
    #[serde(rename = "GUI Skin")]
    GuiSkin,
    Material,
    Mesh,
    Model,
    #[serde(rename = "Physic Material")]
    PhysicMaterial,
    Prefab,
    Scene,
    Script,
    #[serde(rename = "Scriptable Object")]
    ScriptableObject,
    Shader,
    Sprite,
    Texture,
    #[serde(rename = "Video Clip")]
    VideoClip,
    #[serde(rename = "Visual Effect Asset")]
    VisualEffectAsset,
}

impl ObjectType {
    /// Every supported type, in declaration order.
    pub const ALL: [ObjectType; 20] = [
        ObjectType::Folder,
        ObjectType::AnimationClip,
        ObjectType::AudioClip,
        ObjectType::AudioMixer,
        ObjectType::ComputeShader,
        ObjectType::Font,
        ObjectType::GuiSkin,
        ObjectType::Material,
        ObjectType::Mesh,
        ObjectType::Model,
        ObjectType::PhysicMaterial,
        ObjectType::Prefab,
        ObjectType::Scene,
        ObjectType::Script,
        ObjectType::ScriptableObject,
        ObjectType::Shader,
        ObjectType::Sprite,
        ObjectType::Texture,
        ObjectType::VideoClip,
        ObjectType::VisualEffectAsset,
    ];

    /// Returns the human-readable label for this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use nametidy::object_type::ObjectType;
    ///
    /// assert_eq!(ObjectType::Material.label(), "Material");
    /// assert_eq!(ObjectType::AnimationClip.label(), "Animation Clip");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            ObjectType::Folder => "Folder",
            ObjectType::AnimationClip => "Animation Clip",
            ObjectType::AudioClip => "Audio Clip",
            ObjectType::AudioMixer => "Audio Mixer",
            ObjectType::ComputeShader => "Compute Shader",
            ObjectType::Font => "Font",
            ObjectType::GuiSkin => "GUI Skin",
            ObjectType::Material => "Material",
            ObjectType::Mesh => "Mesh",
            ObjectType::Model => "Model",
            ObjectType::PhysicMaterial => "Physic Material",
            ObjectType::Prefab => "Prefab",
            ObjectType::Scene => "Scene",
            ObjectType::Script => "Script",
            ObjectType::ScriptableObject => "Scriptable Object",
            ObjectType::Shader => "Shader",
            ObjectType::Sprite => "Sprite",
            ObjectType::Texture => "Texture",
            ObjectType::VideoClip => "Video Clip",
            ObjectType::VisualEffectAsset => "Visual Effect Asset",
        }
    }

    /// Looks up a type by its exact label.
    pub fn from_label(label: &str) -> Option<ObjectType> {
        ObjectType::ALL.iter().copied().find(|t| t.label() == label)
    }

    /// Returns the extension set defining this type. Empty for `Folder`,
    /// which is matched by directory-kind instead.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ObjectType::Folder => &[],
            ObjectType::AnimationClip => &["anim"],
            ObjectType::AudioClip => &["mp3", "wav", "ogg"],
            ObjectType::AudioMixer => &["mixer"],
            ObjectType::ComputeShader => &["compute"],
            ObjectType::Font => &["ttf", "otf"],
            ObjectType::GuiSkin => &["guiskin"],
            ObjectType::Material => &["mat"],
            ObjectType::Mesh => &["mesh"],
            ObjectType::Model => &["fbx", "obj"],
            ObjectType::PhysicMaterial => &["physicMaterial"],
            ObjectType::Prefab => &["prefab"],
            ObjectType::Scene => &["unity"],
            ObjectType::Script => &["cs"],
            ObjectType::ScriptableObject => &["asset"],
            ObjectType::Shader => &["shader"],
            ObjectType::Sprite => &["png", "jpg"],
            ObjectType::Texture => &["tga", "psd", "exr", "hdr"],
            ObjectType::VideoClip => &["mp4", "mov"],
            ObjectType::VisualEffectAsset => &["vfx"],
        }
    }
}

/// Classifies asset paths into object types.
///
/// Holds a lowercase extension → type map built once from the fixed table,
/// so per-path checks are a single hash lookup plus a file-kind probe.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    extension_map: HashMap<String, ObjectType>,
}

impl TypeClassifier {
    /// Creates a classifier with the full extension table loaded.
    pub fn new() -> Self {
        let mut extension_map = HashMap::new();
        for object_type in ObjectType::ALL {
            for ext in object_type.extensions() {
                extension_map.insert(ext.to_lowercase(), object_type);
            }
        }
        Self { extension_map }
    }

    /// Maps a file extension (without the dot) to its object type.
    ///
    /// # Examples
    ///
    /// ```
    /// use nametidy::object_type::{ObjectType, TypeClassifier};
    ///
    /// let classifier = TypeClassifier::default();
    /// assert_eq!(classifier.extension_to_type("prefab"), Some(ObjectType::Prefab));
    /// assert_eq!(classifier.extension_to_type("physicmaterial"), Some(ObjectType::PhysicMaterial));
    /// ```
    pub fn extension_to_type(&self, ext: &str) -> Option<ObjectType> {
        self.extension_map.get(&ext.to_lowercase()).copied()
    }

    /// Classifies a path: directories are `Folder`, regular files go through
    /// the extension table, anything else (missing, no extension, unmapped
    /// extension) is `None`.
    pub fn classify(&self, path: &Path) -> Option<ObjectType> {
        if path.is_dir() {
            return Some(ObjectType::Folder);
        }
        if !path.is_file() {
            return None;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extension_to_type(ext))
    }

    /// Checks whether a path matches one specific object type. A missing
    /// path matches nothing.
    pub fn matches(&self, path: &Path, object_type: ObjectType) -> bool {
        if object_type == ObjectType::Folder {
            return path.is_dir();
        }
        if !path.is_file() {
            return false;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extension_to_type(ext))
            == Some(object_type)
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
