use proptest::prelude::*;

use steel_core::calculations::beam::{self, BeamInput, LtbZone};
use steel_core::calculations::column::{self, BucklingRegime, ColumnInput, EffectiveLength, EndConditions};
use steel_core::materials::{builtin_sections, SectionFamily, SectionProperty, SectionRecord, SteelMaterial};
use steel_core::{DesignCode, DesignSettings};

fn settings() -> DesignSettings {
    DesignSettings::new(DesignCode::Aisc360_16)
}

fn family_strategy() -> impl Strategy<Value = SectionFamily> {
    prop::sample::select(SectionFamily::ALL.to_vec())
}

fn flanged_strategy() -> impl Strategy<Value = &'static SectionRecord> {
    let records: Vec<&'static SectionRecord> = builtin_sections().iter().filter(|r| r.family.has_flanges()).collect();
    prop::sample::select(records)
}

fn steel_strategy() -> impl Strategy<Value = SteelMaterial> {
    prop::sample::select(vec![
        SteelMaterial::a36(),
        SteelMaterial::a992(),
        SteelMaterial::g40_300w(),
        SteelMaterial::g40_350w(),
    ])
}

/// Column whose governing slenderness is exactly `lambda` about X-X
fn column_at(section: &SectionRecord, steel: &SteelMaterial, lambda: f64) -> column::ColumnResult {
    let length = 1000.0;
    let kx = lambda * section.rx_mm / length;
    let input = ColumnInput::new("P", length, EndConditions::pinned())
        .with_axes(EffectiveLength::Factor(kx), EffectiveLength::Factor(1.0e-6));
    column::calculate(&input, section, steel, &settings()).unwrap()
}

proptest! {
    #[test]
    fn by_type_names_resolve_to_family(family in family_strategy()) {
        let catalog = builtin_sections();
        for name in catalog.by_type(family, SectionProperty::Weight) {
            prop_assert_eq!(catalog.get(name).unwrap().family, family);
        }
    }

    #[test]
    fn lightest_is_argmin_of_weight(family in family_strategy(), min in 0.0f64..2.0e6) {
        let catalog = builtin_sections();
        let expected = catalog
            .records_of(family)
            .filter(|r| r.zx_mm3 >= min)
            .min_by(|a, b| a.weight_kg_m.total_cmp(&b.weight_kg_m).then_with(|| a.name.cmp(&b.name)));
        match (catalog.lightest(family, SectionProperty::Zx, min), expected) {
            (Ok(found), Some(expected)) => prop_assert_eq!(found.weight_kg_m, expected.weight_kg_m),
            (Err(e), None) => prop_assert_eq!(e.error_code(), "NOT_FOUND"),
            (found, expected) => prop_assert!(false, "lightest {:?} vs expected {:?}", found.map(|r| &r.name), expected.map(|r| &r.name)),
        }
    }

    #[test]
    fn column_regime_boundary(section in flanged_strategy(), steel in steel_strategy()) {
        let limit = 4.71 * (steel.e_mpa / steel.fy_mpa).sqrt();
        let eps = 1.0e-6;
        let below = column_at(section, &steel, limit - eps);
        let above = column_at(section, &steel, limit + eps);

        prop_assert_eq!(below.regime, BucklingRegime::Inelastic);
        prop_assert_eq!(above.regime, BucklingRegime::Elastic);
        // 0.658^(Fy/Fe) Fy and 0.877 Fe meet at the limit
        prop_assert!((below.fcr_mpa - above.fcr_mpa).abs() < 1.0e-3 * below.fcr_mpa);
    }

    #[test]
    fn column_capacity_falls_with_length(section in flanged_strategy(), length in 500.0f64..8000.0) {
        let steel = SteelMaterial::g40_350w();
        let short = column::calculate(&ColumnInput::new("P", length, EndConditions::pinned()), section, &steel, &settings()).unwrap();
        let long = column::calculate(&ColumnInput::new("P", length * 1.5, EndConditions::pinned()), section, &steel, &settings()).unwrap();
        prop_assert!(long.nominal_capacity_kn <= short.nominal_capacity_kn);
        prop_assert!(short.trace.unreproducible(1.0e-9).is_empty());
    }

    #[test]
    fn beam_zone_boundaries(section in flanged_strategy(), steel in steel_strategy()) {
        let run = |lb: f64| beam::calculate(&BeamInput::new("P", lb), section, &steel, &settings()).unwrap();
        let braced = run(0.0);
        let mp = braced.plastic_moment_knm;
        let (lp, lr) = (braced.lp_mm.unwrap(), braced.lr_mm.unwrap());
        prop_assume!(lr > lp);

        prop_assert_eq!(braced.zone, Some(LtbZone::Yielding));
        prop_assert_eq!(braced.nominal_moment_knm, mp);

        let at_lp = run(lp);
        prop_assert_eq!(at_lp.zone, Some(LtbZone::Yielding));
        prop_assert_eq!(at_lp.nominal_moment_knm, mp);

        let mr = 0.7 * steel.fy_mpa * section.sx_mm3 / 1.0e6;
        let at_lr = run(lr);
        prop_assert_eq!(at_lr.zone, Some(LtbZone::Inelastic));
        prop_assert!((at_lr.nominal_moment_knm - mr.min(mp)).abs() < 1.0e-6 * mp);

        let far = run(lr * 1.0e3);
        prop_assert_eq!(far.zone, Some(LtbZone::Elastic));
        prop_assert!(far.nominal_moment_knm < 0.01 * mp);
    }

    #[test]
    fn beam_moment_never_exceeds_mp(section in flanged_strategy(), lb in 0.0f64..20_000.0, cb in 1.0f64..3.0) {
        let r = beam::calculate(&BeamInput::new("P", lb).with_cb(cb), section, &SteelMaterial::a992(), &settings()).unwrap();
        prop_assert!(r.nominal_moment_knm <= r.plastic_moment_knm * (1.0 + 1.0e-12));
        prop_assert!(r.nominal_moment_knm > 0.0);
    }
}
