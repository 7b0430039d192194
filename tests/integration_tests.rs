use censo_infra::pipeline::{PipelineConfig, run};
use censo_infra::table::{filter_municipality, load_municipality, load_table};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = "NU_ANO_CENSO;NO_MUNICIPIO;NO_ENTIDADE;CO_ENTIDADE;NO_BAIRRO;\
IN_AGUA_POTAVEL;IN_ESGOTO_REDE_PUBLICA;IN_LIXO_SERVICO_COLETA;IN_ENERGIA_REDE_PUBLICA;\
IN_BIBLIOTECA;IN_COMPUTADOR;IN_INTERNET";

/// Writes a small Latin-1 census file: 3 Curitiba schools, 2 in São Paulo.
fn write_fixture(dir: &Path) -> PathBuf {
    let lines = [
        HEADER,
        "2024;Curitiba;Escola Água Verde;41000001;Água Verde;1;1;1;1;SIM;1;1",
        "2024;São Paulo;Escola Paulista;35000001;Sé;1;1;1;1;SIM;1;1",
        "2024;CURITIBA;Escola Boqueirão;41000002;Boqueirão;0;0;0;0;NÃO;0;0",
        "2024;São Paulo;Escola Mooca;35000002;Mooca;0;0;0;0;NAO;0;0",
        "2024;Curitiba;Escola Centro;41000003;Centro;1;1;0;0;TALVEZ;1;0",
    ];
    let text = lines.join("\n") + "\n";
    let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();

    fs::create_dir_all(dir).unwrap();
    let path = dir.join("microdados.csv");
    fs::write(&path, bytes).unwrap();
    path
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_filter_reads_latin1() {
    let dir = fresh_dir("censo_infra_it_filter");
    let input = write_fixture(&dir);

    let table = load_table(&input).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(filter_municipality(&table, "CURITIBA").unwrap().len(), 3);
    assert_eq!(filter_municipality(&table, "SÃO PAULO").unwrap().len(), 2);

    let curitiba = load_municipality(&input, "CURITIBA").unwrap();
    assert_eq!(curitiba.headers(), table.headers());
    let names: Vec<&str> = curitiba.column("NO_ENTIDADE").unwrap().collect();
    assert_eq!(names, ["Escola Água Verde", "Escola Boqueirão", "Escola Centro"]);
}

#[test]
fn test_full_pipeline() {
    let dir = fresh_dir("censo_infra_it_pipeline");
    let input = write_fixture(&dir);
    let out_dir = dir.join("resultados");

    let config = PipelineConfig {
        input,
        out_dir: out_dir.clone(),
        full_prefix: Some("curitiba_completo".to_string()),
        ..Default::default()
    };
    let report = run(&config).unwrap();

    // 200 requested, only 3 available
    assert_eq!(report.filtered_rows, 3);
    assert_eq!(report.sampled_rows, 3);

    let sample = fs::read_to_string(out_dir.join("sample_curitiba.csv")).unwrap();
    assert_eq!(sample.lines().count(), 4);
    assert!(sample.starts_with("NU_ANO_CENSO,NO_MUNICIPIO,"));
    assert!(sample.contains("Escola Água Verde"));

    let indicators = fs::read_to_string(out_dir.join("sample_curitiba_indicadores.csv")).unwrap();
    let mut lines = indicators.lines();
    assert_eq!(
        lines.next().unwrap(),
        "NO_ENTIDADE,CO_ENTIDADE,NO_MUNICIPIO,NO_BAIRRO,INFRA_BASICA,AMBIENTES_EDUC,ACESSIBILIDADE,TECNOLOGIA,INDICE_GERAL_INFRA"
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 3);

    let best = rows
        .iter()
        .find(|r| r.starts_with("Escola Água Verde,"))
        .unwrap();
    // 4/4 basic, 1/9 environments, 0/7 accessibility, 2/6 technology
    let fields: Vec<f64> = best.split(',').skip(4).map(|f| f.parse().unwrap()).collect();
    assert_eq!(fields[0], 1.0);
    assert_eq!(fields[1], 1.0 / 9.0);
    assert_eq!(fields[2], 0.0);
    assert_eq!(fields[3], 2.0 / 6.0);
    assert_eq!(fields[4], (1.0 + 1.0 / 9.0 + 0.0 + 2.0 / 6.0) / 4.0);

    let worst = rows.iter().find(|r| r.starts_with("Escola Boqueirão,")).unwrap();
    assert!(worst.ends_with(",0.0,0.0,0.0,0.0,0.0"));

    let png = fs::read(out_dir.join("sample_curitiba_hist_indice.png")).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out_dir.join("sample_curitiba_resumo.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["schools"], 3);

    let full = report.full_outputs.unwrap();
    assert!(full.indicators_csv.ends_with("curitiba_completo_indicadores.csv"));
    assert!(full.histogram_png.exists());
}

#[test]
fn test_pipeline_with_no_matching_schools() {
    let dir = fresh_dir("censo_infra_it_empty");
    let input = write_fixture(&dir);
    let out_dir = dir.join("resultados");

    let config = PipelineConfig {
        input,
        out_dir: out_dir.clone(),
        municipality: "LONDRINA".to_string(),
        ..Default::default()
    };
    let report = run(&config).unwrap();

    assert_eq!(report.filtered_rows, 0);
    assert_eq!(report.sampled_rows, 0);

    let indicators = fs::read_to_string(out_dir.join("sample_curitiba_indicadores.csv")).unwrap();
    assert_eq!(indicators.lines().count(), 1);
    assert!(out_dir.join("sample_curitiba_hist_indice.png").exists());
}
