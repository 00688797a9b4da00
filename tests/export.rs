#[cfg(test)]
mod tests {
    use calamine::{open_workbook_auto, Reader};
    use lpa::libs::config::Config;
    use lpa::libs::export::{default_file_name, scatter_points, ExportFormat, Exporter, DERIVED_COLUMNS};
    use lpa::libs::pipeline::{analyze_file, Analysis};
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const ORDERS: &str = "\
Delivery,CUSTOMER,Material,Process Time,START,END,Number of pieces
D1,Acme,BOLT,00:10,08:00,08:10,2
D2,Acme,BOLT,,22:00,02:00,4
D3,Globex,BOLT,00:30,09:00,09:30,3
D4,Globex,GEAR,,,,1
";

    struct ExportTestContext {
        temp_dir: TempDir,
        analysis: Analysis,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());

            let input = temp_dir.path().join("orders.csv");
            fs::write(&input, ORDERS).unwrap();
            let analysis = analyze_file(&input, &Config::default()).unwrap();

            ExportTestContext { temp_dir, analysis }
        }
    }

    #[test]
    fn test_default_file_name() {
        let version = env!("CARGO_PKG_VERSION");
        assert_eq!(
            default_file_name(ExportFormat::Excel),
            format!("Logistics_Analysis_v{}.xlsx", version)
        );
        assert_eq!(
            Exporter::new(ExportFormat::Json, None).output_path().to_string_lossy(),
            format!("Logistics_Analysis_v{}.json", version)
        );
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("clean.csv");
        Exporter::new(ExportFormat::Csv, Some(output_path.clone()))
            .export(&ctx.analysis)
            .unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Delivery,CUSTOMER,Material"));
        for column in DERIVED_COLUMNS {
            assert!(header.contains(column));
        }

        // Only the three valid orders
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("D2,"));
        assert!(rows[1].ends_with(",240,4,60"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("report.json");
        Exporter::new(ExportFormat::Json, Some(output_path.clone()))
            .export(&ctx.analysis)
            .unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["headline"]["orders"]["total"], 4);
        assert_eq!(json["headline"]["orders"]["valid"], 3);
        assert_eq!(json["slowest_materials"][0]["key"], "BOLT");
        assert_eq!(json["hourly_load"]["buckets"].as_array().unwrap().len(), 24);
        assert_eq!(json["scatter"].as_array().unwrap().len(), 3);
        assert_eq!(json["scatter"][1]["duration_min"], 240.0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_excel(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("report.xlsx");
        Exporter::new(ExportFormat::Excel, Some(output_path.clone()))
            .export(&ctx.analysis)
            .unwrap();

        let workbook = open_workbook_auto(&output_path).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec!["Clean_Data", "Top_Materials", "Customers", "Summary"]
        );

        // The clean sheet loads back with the same durations
        let reloaded = analyze_file(&output_path, &Config::default()).unwrap();
        assert_eq!(reloaded.headline.orders.total, 3);
        let before: Vec<f64> = ctx.analysis.metrics.iter().map(|m| m.duration_min).collect();
        let after: Vec<f64> = reloaded.metrics.iter().map(|m| m.duration_min).collect();
        assert_eq!(before, after);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_excel_without_material_column(ctx: &mut ExportTestContext) {
        let input = ctx.temp_dir.path().join("plain.csv");
        fs::write(&input, "Order,Process Time\nA,00:10\nB,00:20\n").unwrap();
        let analysis = analyze_file(&input, &Config::default()).unwrap();

        let output_path = ctx.temp_dir.path().join("plain.xlsx");
        Exporter::new(ExportFormat::Excel, Some(output_path.clone()))
            .export(&analysis)
            .unwrap();

        let workbook = open_workbook_auto(&output_path).unwrap();
        assert!(!workbook.sheet_names().contains(&"Top_Materials".to_string()));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_scatter_points(ctx: &mut ExportTestContext) {
        let points = scatter_points(&ctx.analysis.metrics);
        let pieces: Vec<f64> = points.iter().map(|p| p.pieces).collect();
        assert_eq!(pieces, vec![2.0, 4.0, 3.0]);
    }
}
