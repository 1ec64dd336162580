#[cfg(test)]
mod test {
    use crate::{
        observation::decoder::decode_observations,
        prelude::*,
        tests::toolkit::{build_observables, header_line, slot, values_at, FixtureBuilder},
    };
    use rand::Rng;
    use std::str::FromStr;

    #[test]
    fn value_round_trip() {
        let mut rng = rand::thread_rng();
        // largest magnitudes that still fit F14.3 and F16.3
        for (width, max) in [(14, 999_999_999.0), (16, 99_999_999_999.0)] {
            for _ in 0..1000 {
                let value: f64 = rng.gen_range(-max..max);
                let lli: u8 = rng.gen_range(0..8);
                let snr: u8 = rng.gen_range(0..10);

                let field = slot(Some(value), Some(lli), Some(snr), width);
                assert_eq!(field.len(), width + 2, "\"{}\" does not fit", field);

                let line = format!("G01{}", field);
                let decoded = decode_observations(&line, &[Some(width)]);

                assert!(decoded.truncated.is_empty());
                let decoded = decoded.fields[0];
                let err = (decoded.value.unwrap() - value).abs();
                assert!(err <= 5.0E-4 + value.abs() * 1.0E-15, "{} decoded as {:?}", value, decoded);
                assert_eq!(decoded.lli, Some(lli));
                assert_eq!(decoded.snr, Some(snr));
            }
        }
    }

    #[test]
    fn zero_padded_values() {
        let rinex = FixtureBuilder::v3()
            .observables('G', &["C1C", "S1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .raw(&format!("G01{}  {}  ", "0020176608.780", "   0000045.250"))
            .parse();
        assert!(rinex.diagnostics.is_empty());
        let values = values_at(&rinex, &rinex.epochs()[0].key);
        assert_eq!(values[0].2, Some(20176608.78));
        assert_eq!(values[1].2, Some(45.25));
    }

    #[test]
    fn truncated_line() {
        let fixture = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C", "D1C", "S1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1);

        let full = format!(
            "G01{}{}{}{}",
            slot(Some(20176608.78), None, Some(7), 14),
            slot(Some(106028802.118), Some(0), Some(7), 16),
            slot(Some(-1009.418), None, None, 14),
            slot(Some(50.25), None, None, 14),
        );
        // 4 columns short of the declared width
        let truncated = &full[..full.len() - 4];

        let rinex = fixture.raw(truncated).parse();

        assert!(rinex.is_complete());
        assert_eq!(
            rinex.diagnostics.iter().collect::<Vec<_>>(),
            vec![&Diagnostic::TruncatedField {
                line: 5,
                sv: SV::from_str("G01").unwrap(),
                code: Observable::from_str("S1C").unwrap(),
            }]
        );

        let values = values_at(&rinex, &rinex.epochs()[0].key)
            .into_iter()
            .map(|(_, observable, value)| (observable.to_string(), value))
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                ("C1C".to_string(), Some(20176608.78)),
                ("L1C".to_string(), Some(106028802.118)),
                ("D1C".to_string(), Some(-1009.418)),
                ("S1C".to_string(), None),
            ]
        );
    }

    #[test]
    fn blank_value_field() {
        let rinex = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C", "D1C", "S1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .satellite("G01", &[Some(20176608.78), Some(106028802.118), None, Some(50.25)])
            .parse();
        assert!(rinex.diagnostics.is_empty());
        let values = values_at(&rinex, &rinex.epochs()[0].key);
        assert_eq!(values.len(), 4);
        assert_eq!(values[2].1, Observable::from_str("D1C").unwrap());
        assert_eq!(values[2].2, None);
        assert_eq!(values[3].2, Some(50.25));
    }

    #[test]
    fn standard_phase_width() {
        let line = format!(
            "G01{}{}{}{}",
            slot(Some(20176608.78), None, Some(7), 14),
            slot(Some(106028802.118), Some(0), Some(7), 16),
            slot(Some(-1009.418), None, None, 14),
            slot(None, None, None, 14),
        );
        assert_eq!(line.len(), 3 + 16 + 18 + 16 + 16);

        let rinex = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C", "D1C", "S1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .raw(&line)
            .parse();

        assert!(rinex.diagnostics.is_empty(), "{:?}", rinex.diagnostics);

        let records = rinex.store.iter().collect::<Vec<_>>();
        assert_eq!(records.len(), 4);
        assert!(records
            .iter()
            .all(|r| r.key.sv == SV::from_str("G01").unwrap()));
        assert_eq!(
            records
                .iter()
                .map(|r| r.key.observable.clone())
                .collect::<Vec<_>>(),
            build_observables("C1C, L1C, D1C, S1C")
        );
        assert_eq!(records[0].value.value, Some(20176608.78));
        assert_eq!(records[0].value.snr, Some(7));
        assert_eq!(records[1].value.value, Some(106028802.118));
        assert_eq!(records[1].value.lli, Some(0));
        assert_eq!(records[1].value.snr, Some(7));
        assert_eq!(records[2].value.value, Some(-1009.418));
        assert_eq!(records[3].value.value, None);
    }

    #[test]
    fn narrow_phase_field() {
        let widths = FieldWidths::default().with_code_width(3, "L1C", 14);
        let opts = ParsingOptions::default().with_widths(widths);

        let line = format!(
            "G01{}{}{}{}",
            slot(Some(20176608.78), None, None, 14),
            slot(Some(106028802.118), Some(1), Some(6), 14),
            slot(Some(-1009.418), None, None, 14),
            slot(Some(50.25), None, None, 14),
        );

        let rinex = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C", "D1C", "S1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .raw(&line)
            .parse_with(&opts);

        assert!(rinex.diagnostics.is_empty());

        let records = rinex.store.iter().collect::<Vec<_>>();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].value.value, Some(106028802.118));
        assert_eq!(records[1].value.lli_flags(), Some(LliFlags::LOCK_LOSS));
        assert_eq!(records[1].value.snr_bucket(), Some(SNR::DbHz36_41));
        assert_eq!(records[2].value.value, Some(-1009.418));
        assert_eq!(records[3].value.value, Some(50.25));

        // same line, standard widths: fields from L1C on are misaligned
        let misread = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C", "D1C", "S1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .raw(&line)
            .parse();
        let values = values_at(&misread, &misread.epochs()[0].key);
        assert_eq!(values[0].2, Some(20176608.78));
        assert_ne!(values[1].2, Some(106028802.118));
    }

    #[test]
    fn unknown_code_width() {
        let rinex = FixtureBuilder::v3()
            .observables('R', &["C1C", "X1", "L1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .satellite("R01", &[Some(20176608.78), Some(1.0), Some(106028802.118)])
            .parse();

        assert_eq!(
            rinex.diagnostics.iter().collect::<Vec<_>>(),
            vec![&Diagnostic::UnknownObservationCode {
                line: 5,
                sv: SV::from_str("R01").unwrap(),
                code: Observable::from_str("X1").unwrap(),
            }]
        );

        let values = values_at(&rinex, &rinex.epochs()[0].key);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].2, Some(20176608.78));
        assert_eq!(values[1].2, None);
        assert_eq!(values[2].2, None);
    }

    #[test]
    fn scaled_observations() {
        let fixture = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C"])
            .header("G   10  1 L1C", "SYS / SCALE FACTOR")
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .satellite("G01", &[Some(20176608.78), Some(1060288021.18)]);

        let rinex = fixture.parse();
        assert!(rinex.diagnostics.is_empty());
        let values = values_at(&rinex, &rinex.epochs()[0].key);
        assert_eq!(values[0].2, Some(20176608.78));
        let l1c = values[1].2.unwrap();
        assert!((l1c - 106028802.118).abs() < 1.0E-6);

        let raw = fixture.parse_with(&ParsingOptions::default().with_scaling(false));
        let values = values_at(&raw, &raw.epochs()[0].key);
        assert_eq!(values[1].2, Some(1060288021.18));
    }

    #[test]
    fn split_code_declaration() {
        let rinex = FixtureBuilder::v3()
            .header("G    4 C1C L1C", "SYS / # / OBS TYPES")
            .header("       D1C S1C", "SYS / # / OBS TYPES")
            .header("E    1 C5Q", "SYS / # / OBS TYPES")
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 2)
            .satellite("G01", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)])
            .satellite("E05", &[Some(5.0)])
            .parse();

        assert!(rinex.diagnostics.is_empty());
        assert_eq!(
            rinex.header.registry().observables(&Constellation::GPS),
            Some(build_observables("C1C, L1C, D1C, S1C").as_slice())
        );
        assert_eq!(rinex.store.len(), 5);
        assert_eq!(
            rinex.store.observables(Constellation::Galileo),
            build_observables("C5Q")
        );
    }

    #[test]
    fn malformed_header_fields() {
        let rinex = FixtureBuilder::v3()
            .header("  4594489.88OO  -678367.7200  4357066.1500", "APPROX POSITION XYZ")
            .header("  abcd", "INTERVAL")
            .observables('G', &["C1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .satellite("G01", &[Some(1.0)])
            .parse();

        assert_eq!(rinex.diagnostics.len(), 2);
        assert!(rinex
            .diagnostics
            .iter()
            .all(|d| matches!(d, Diagnostic::MalformedHeaderField { .. })));
        assert!(rinex.header.rx_position.is_none());
        assert!(rinex.header.sampling_interval.is_none());
        assert_eq!(rinex.store.len(), 1);
    }

    #[test]
    fn glonass_header_content() {
        let rinex = FixtureBuilder::v3()
            .observables('R', &["C1C", "L1C"])
            .header("  2 R01  1 R02 -4", "GLONASS SLOT / FRQ #")
            .header(" C1C  -10.000 C1P  -10.123 C2C  -10.432 C2P  -10.634", "GLONASS COD/PHS/BIS")
            .header("R L1C  0.25000  1 R01", "SYS / PHASE SHIFT")
            .end_of_header()
            .parse();

        assert!(rinex.diagnostics.is_empty(), "{:?}", rinex.diagnostics);
        let registry = rinex.header.registry();
        let r01 = SV::from_str("R01").unwrap();
        assert_eq!(registry.glonass_channel(&r01), Some(1));
        assert_eq!(
            registry.glonass_bias(&Observable::from_str("C2P").unwrap()),
            Some(Some(-10.634))
        );
        let shift = registry
            .phase_shift(Constellation::Glonass, &Observable::from_str("L1C").unwrap())
            .unwrap();
        assert!(shift.applies_to(&r01));
        assert!(!shift.applies_to(&SV::from_str("R02").unwrap()));
        assert_eq!(header_line("", "END OF HEADER").len(), 73);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn width_table_from_json() {
        let content = r#"[
            { "major": 3, "key": { "Kind": "PseudoRange" }, "width": 14 },
            { "major": 3, "key": { "Kind": "Phase" }, "width": 14 },
            { "major": 3, "key": { "Code": "L1C" }, "width": 16 }
        ]"#;
        let widths: FieldWidths = serde_json::from_str(content).unwrap();

        let version = Version::new(3, 4);
        let l1c = Observable::from_str("L1C").unwrap();
        let l2w = Observable::from_str("L2W").unwrap();
        let d1c = Observable::from_str("D1C").unwrap();
        assert_eq!(widths.value_width(version, &l1c), Some(16));
        assert_eq!(widths.value_width(version, &l2w), Some(14));
        assert_eq!(widths.value_width(version, &d1c), None);

        let opts: ParsingOptions = serde_json::from_str(r#"{ "orphan_threshold": 2 }"#).unwrap();
        assert_eq!(opts.orphan_threshold, 2);
        assert!(opts.apply_scaling);
        assert!(opts.cancel.is_none());
        assert_eq!(opts.widths, FieldWidths::default());

        let opts = opts.with_widths(widths);
        let line = format!(
            "G01{}{}",
            slot(Some(20176608.78), None, None, 14),
            slot(Some(1106028802.118), None, None, 16),
        );
        let rinex = FixtureBuilder::v3()
            .observables('G', &["C1C", "L1C"])
            .end_of_header()
            .epoch(0, 0, 0.0, 0, 1)
            .raw(&line)
            .parse_with(&opts);
        assert!(rinex.diagnostics.is_empty());
        let values = values_at(&rinex, &rinex.epochs()[0].key);
        assert_eq!(values[1].2, Some(1106028802.118));
    }
}
