//! Material color schemes and themes built from one source color.
//!
//! A scheme assigns every color role a fixed tone of one of the core
//! palettes. Light schemes keep accents dark on light surfaces; dark
//! schemes flip that.

use crate::blend::harmonize;
use crate::hex::hex_from_argb;
use crate::palettes::{CorePalette, TonalPalette};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// ARGB for each color role of a light or dark scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub primary: u32,
    pub on_primary: u32,
    pub primary_container: u32,
    pub on_primary_container: u32,
    pub secondary: u32,
    pub on_secondary: u32,
    pub secondary_container: u32,
    pub on_secondary_container: u32,
    pub tertiary: u32,
    pub on_tertiary: u32,
    pub tertiary_container: u32,
    pub on_tertiary_container: u32,
    pub error: u32,
    pub on_error: u32,
    pub error_container: u32,
    pub on_error_container: u32,
    pub background: u32,
    pub on_background: u32,
    pub surface: u32,
    pub on_surface: u32,
    pub surface_variant: u32,
    pub on_surface_variant: u32,
    pub outline: u32,
    pub outline_variant: u32,
    pub shadow: u32,
    pub scrim: u32,
    pub inverse_surface: u32,
    pub inverse_on_surface: u32,
    pub inverse_primary: u32,
}

impl Scheme {
    pub fn light(argb: u32) -> Self {
        Self::light_from_core_palette(&CorePalette::of(argb))
    }

    pub fn dark(argb: u32) -> Self {
        Self::dark_from_core_palette(&CorePalette::of(argb))
    }

    pub fn light_from_core_palette(core: &CorePalette) -> Self {
        Self {
            primary: core.a1.tone(40.0),
            on_primary: core.a1.tone(100.0),
            primary_container: core.a1.tone(90.0),
            on_primary_container: core.a1.tone(10.0),
            secondary: core.a2.tone(40.0),
            on_secondary: core.a2.tone(100.0),
            secondary_container: core.a2.tone(90.0),
            on_secondary_container: core.a2.tone(10.0),
            tertiary: core.a3.tone(40.0),
            on_tertiary: core.a3.tone(100.0),
            tertiary_container: core.a3.tone(90.0),
            on_tertiary_container: core.a3.tone(10.0),
            error: core.error.tone(40.0),
            on_error: core.error.tone(100.0),
            error_container: core.error.tone(90.0),
            on_error_container: core.error.tone(10.0),
            background: core.n1.tone(99.0),
            on_background: core.n1.tone(10.0),
            surface: core.n1.tone(99.0),
            on_surface: core.n1.tone(10.0),
            surface_variant: core.n2.tone(90.0),
            on_surface_variant: core.n2.tone(30.0),
            outline: core.n2.tone(50.0),
            outline_variant: core.n2.tone(80.0),
            shadow: core.n1.tone(0.0),
            scrim: core.n1.tone(0.0),
            inverse_surface: core.n1.tone(20.0),
            inverse_on_surface: core.n1.tone(95.0),
            inverse_primary: core.a1.tone(80.0),
        }
    }

    pub fn dark_from_core_palette(core: &CorePalette) -> Self {
        Self {
            primary: core.a1.tone(80.0),
            on_primary: core.a1.tone(20.0),
            primary_container: core.a1.tone(30.0),
            on_primary_container: core.a1.tone(90.0),
            secondary: core.a2.tone(80.0),
            on_secondary: core.a2.tone(20.0),
            secondary_container: core.a2.tone(30.0),
            on_secondary_container: core.a2.tone(90.0),
            tertiary: core.a3.tone(80.0),
            on_tertiary: core.a3.tone(20.0),
            tertiary_container: core.a3.tone(30.0),
            on_tertiary_container: core.a3.tone(90.0),
            error: core.error.tone(80.0),
            on_error: core.error.tone(20.0),
            error_container: core.error.tone(30.0),
            on_error_container: core.error.tone(80.0),
            background: core.n1.tone(10.0),
            on_background: core.n1.tone(90.0),
            surface: core.n1.tone(10.0),
            on_surface: core.n1.tone(90.0),
            surface_variant: core.n2.tone(30.0),
            on_surface_variant: core.n2.tone(80.0),
            outline: core.n2.tone(60.0),
            outline_variant: core.n2.tone(30.0),
            shadow: core.n1.tone(0.0),
            scrim: core.n1.tone(0.0),
            inverse_surface: core.n1.tone(90.0),
            inverse_on_surface: core.n1.tone(20.0),
            inverse_primary: core.a1.tone(40.0),
        }
    }

    /// Role names (camelCase) and colors, in declaration order.
    pub fn roles(&self) -> [(&'static str, u32); 29] {
        [
            ("primary", self.primary),
            ("onPrimary", self.on_primary),
            ("primaryContainer", self.primary_container),
            ("onPrimaryContainer", self.on_primary_container),
            ("secondary", self.secondary),
            ("onSecondary", self.on_secondary),
            ("secondaryContainer", self.secondary_container),
            ("onSecondaryContainer", self.on_secondary_container),
            ("tertiary", self.tertiary),
            ("onTertiary", self.on_tertiary),
            ("tertiaryContainer", self.tertiary_container),
            ("onTertiaryContainer", self.on_tertiary_container),
            ("error", self.error),
            ("onError", self.on_error),
            ("errorContainer", self.error_container),
            ("onErrorContainer", self.on_error_container),
            ("background", self.background),
            ("onBackground", self.on_background),
            ("surface", self.surface),
            ("onSurface", self.on_surface),
            ("surfaceVariant", self.surface_variant),
            ("onSurfaceVariant", self.on_surface_variant),
            ("outline", self.outline),
            ("outlineVariant", self.outline_variant),
            ("shadow", self.shadow),
            ("scrim", self.scrim),
            ("inverseSurface", self.inverse_surface),
            ("inverseOnSurface", self.inverse_on_surface),
            ("inversePrimary", self.inverse_primary),
        ]
    }

    /// Role name to `#rrggbb`.
    pub fn to_hex_json(&self) -> Value {
        let roles: Map<String, Value> = self
            .roles()
            .iter()
            .map(|&(name, argb)| (name.to_string(), Value::String(hex_from_argb(argb))))
            .collect();
        Value::Object(roles)
    }
}

/// A brand color a theme should carry alongside its generated roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColor {
    pub name: String,
    pub value: u32,
    /// Harmonize toward the theme source before building the group.
    #[serde(default)]
    pub blend: bool,
}

/// The four roles of one accent in one scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorGroup {
    pub color: u32,
    pub on_color: u32,
    pub color_container: u32,
    pub on_color_container: u32,
}

impl ColorGroup {
    fn to_hex_json(self) -> Value {
        json!({
            "color": hex_from_argb(self.color),
            "onColor": hex_from_argb(self.on_color),
            "colorContainer": hex_from_argb(self.color_container),
            "onColorContainer": hex_from_argb(self.on_color_container),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomColorGroup {
    pub color: CustomColor,
    /// The custom color after optional harmonization.
    pub value: u32,
    pub light: ColorGroup,
    pub dark: ColorGroup,
}

/// Builds the light and dark roles of `color` for a theme seeded by `source`.
pub fn custom_color(source: u32, color: &CustomColor) -> CustomColorGroup {
    let value = if color.blend {
        harmonize(color.value, source)
    } else {
        color.value
    };
    let tones = CorePalette::of(value).a1;
    CustomColorGroup {
        color: color.clone(),
        value,
        light: ColorGroup {
            color: tones.tone(40.0),
            on_color: tones.tone(100.0),
            color_container: tones.tone(90.0),
            on_color_container: tones.tone(10.0),
        },
        dark: ColorGroup {
            color: tones.tone(80.0),
            on_color: tones.tone(20.0),
            color_container: tones.tone(30.0),
            on_color_container: tones.tone(90.0),
        },
    }
}

/// Everything a UI needs to apply a color theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub source: u32,
    pub light: Scheme,
    pub dark: Scheme,
    pub palettes: CorePalette,
    pub custom_colors: Vec<CustomColorGroup>,
}

impl Theme {
    /// Hex rendering of the theme; palettes are sampled at `tones`.
    pub fn to_hex_json(&self, tones: &[f64]) -> Value {
        let palettes: [(&str, &TonalPalette); 6] = [
            ("primary", &self.palettes.a1),
            ("secondary", &self.palettes.a2),
            ("tertiary", &self.palettes.a3),
            ("neutral", &self.palettes.n1),
            ("neutralVariant", &self.palettes.n2),
            ("error", &self.palettes.error),
        ];
        let palettes: Map<String, Value> = palettes
            .iter()
            .map(|&(name, palette)| {
                let swatches: Map<String, Value> = tones
                    .iter()
                    .map(|&tone| (tone.to_string(), Value::String(hex_from_argb(palette.tone(tone)))))
                    .collect();
                (name.to_string(), Value::Object(swatches))
            })
            .collect();
        let custom_colors: Vec<Value> = self
            .custom_colors
            .iter()
            .map(|group| {
                json!({
                    "name": group.color.name,
                    "value": hex_from_argb(group.value),
                    "blend": group.color.blend,
                    "light": group.light.to_hex_json(),
                    "dark": group.dark.to_hex_json(),
                })
            })
            .collect();
        json!({
            "source": hex_from_argb(self.source),
            "schemes": {
                "light": self.light.to_hex_json(),
                "dark": self.dark.to_hex_json(),
            },
            "palettes": palettes,
            "customColors": custom_colors,
        })
    }
}

/// Light and dark schemes, key palettes and custom color groups for `source`.
pub fn theme_from_source_color(source: u32, custom_colors: &[CustomColor]) -> Theme {
    let palettes = CorePalette::of(source);
    Theme {
        source,
        light: Scheme::light_from_core_palette(&palettes),
        dark: Scheme::dark_from_core_palette(&palettes),
        custom_colors: custom_colors
            .iter()
            .map(|color| custom_color(source, color))
            .collect(),
        palettes,
    }
}
