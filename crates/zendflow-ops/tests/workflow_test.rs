//! Workflow tests against a mock Zend Server

use mockito::{Matcher, Mock, Server};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use zendflow_api::{BootstrapRequest, ClusterJoinRequest, EndpointTarget, Poller, ZendClient};
use zendflow_config::{ApplicationConfig, ZendflowConfig};
use zendflow_ops::{
    DeployOutcome, add_server, bootstrap_server_at, create_cluster, deploy_or_update,
    deploy_or_update_by_id, export_config, synchronize_all,
};

const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://www.zend.com/server/deployment-descriptor/1.0">
  <name>shop</name>
  <version><release>1.3.0</release></version>
  <parameters>
    <parameter id="db_host" required="true" type="string"/>
  </parameters>
</package>"#;

fn client_for(server: &Server) -> ZendClient {
    ZendClient::new(EndpointTarget::new(server.host_with_port(), "admin", "secret"))
        .unwrap()
        .with_poller(Poller::new(Duration::ZERO).without_progress())
}

fn envelope(response_data: &str) -> String {
    format!(
        r#"<zendServerAPIResponse xmlns="http://www.zend.com/server/api/1.9"><responseData>{}</responseData></zendServerAPIResponse>"#,
        response_data
    )
}

fn get(server: &mut Server, method: &str, body: &str) -> Mock {
    server
        .mock("GET", format!("/ZendServer/Api/{}", method).as_str())
        .with_status(200)
        .with_body(envelope(body))
        .create()
}

fn post(server: &mut Server, method: &str, body: &str) -> Mock {
    server
        .mock("POST", format!("/ZendServer/Api/{}", method).as_str())
        .with_status(200)
        .with_body(envelope(body))
        .create()
}

fn tasks_complete(server: &mut Server) -> Mock {
    get(server, "tasksComplete", "<tasksComplete>true</tasksComplete>")
}

fn servers_list(statuses: &[(&str, &str)]) -> String {
    let servers: String = statuses
        .iter()
        .map(|(id, status)| {
            format!(
                "<serverInfo><id>{}</id><name>web-{}</name><status>{}</status></serverInfo>",
                id, id, status
            )
        })
        .collect();
    format!("<serversList>{}</serversList>", servers)
}

fn write_package(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("shop-1.3.0.zpk");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file("deployment.xml", options).unwrap();
    zip.write_all(DESCRIPTOR.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

fn shop_config(db_host: &str) -> ZendflowConfig {
    let mut config = ZendflowConfig::default();
    let mut app = ApplicationConfig {
        base_url: Some("http://shop.example.com/".to_string()),
        display_name: Some("Shop".to_string()),
        ..Default::default()
    };
    app.params.insert("db_host".to_string(), db_host.to_string());
    config.applications.insert("shop".to_string(), app);
    config
}

fn shop_info(status: &str) -> String {
    format!(
        "<applicationInfo><id>7</id><appName>shop</appName><userAppName>Shop</userAppName>\
         <baseUrl>http://shop.example.com:80/</baseUrl><status>{}</status></applicationInfo>",
        status
    )
}

#[test]
fn test_synchronize_applies_every_kind_and_restarts_once() -> anyhow::Result<()> {
    let mut server = Server::new();

    let _status = get(
        &mut server,
        "vhostGetStatus",
        "<vhostList><vhostInfo><id>3</id><name>shop.example.com:80</name><servers>\
         <vhostServer><id>1</id><status>Ok</status></vhostServer>\
         <vhostServer><id>2</id><status>Modified</status></vhostServer>\
         </servers></vhostInfo></vhostList>",
    );
    let _details = server
        .mock("GET", "/ZendServer/Api/vhostGetDetails")
        .match_query(Matcher::UrlEncoded("vhost".into(), "3".into()))
        .with_status(200)
        .with_body(envelope(
            "<vhostDetails><vhostInfo><id>3</id><name>shop.example.com:80</name></vhostInfo>\
             <vhostExtended><template>&lt;VirtualHost *:80&gt;&lt;/VirtualHost&gt;</template></vhostExtended></vhostDetails>",
        ))
        .create();
    let redeploy = server
        .mock("POST", "/ZendServer/Api/vhostRedeploy")
        .match_body(Matcher::UrlEncoded("vhost".into(), "3".into()))
        .with_status(200)
        .with_body(envelope("<vhostDetails/>"))
        .create();
    let edit = server
        .mock("POST", "/ZendServer/Api/vhostEdit")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("vhostId".into(), "3".into()),
            Matcher::UrlEncoded(
                "template".into(),
                "<VirtualHost *:80>\n  DocumentRoot /srv/shop\n</VirtualHost>".into(),
            ),
        ]))
        .with_status(200)
        .with_body(envelope("<vhostDetails/>"))
        .create();

    let _extensions = get(
        &mut server,
        "configurationExtensionsList",
        "<extensions><extension><name>curl</name><loaded>false</loaded></extension>\
         <extension><name>intl</name><loaded>true</loaded></extension></extensions>",
    );
    let enable = server
        .mock("POST", "/ZendServer/Api/configurationExtensionsOn")
        .match_body(Matcher::UrlEncoded("extensions[0]".into(), "curl".into()))
        .with_status(200)
        .with_body(envelope("<extensions/>"))
        .create();

    let _directives = get(
        &mut server,
        "configurationDirectivesList",
        "<directives><directive><name>memory_limit</name><fileValue>128M</fileValue>\
         <defaultValue>128M</defaultValue></directive></directives>",
    );
    let store = server
        .mock("POST", "/ZendServer/Api/configurationStoreDirectives")
        .match_body(Matcher::UrlEncoded(
            "directives[memory_limit]".into(),
            "256M".into(),
        ))
        .with_status(200)
        .with_body(envelope("<directives/>"))
        .create();

    let restart = post(&mut server, "restartPhp", &servers_list(&[("1", "OK")]));
    let _tasks = tasks_complete(&mut server);

    let mut config = ZendflowConfig::default();
    config.vhosts.insert(
        "shop.example.com:80".to_string(),
        "\n<VirtualHost *:80>\n  DocumentRoot /srv/shop\n</VirtualHost>\n".to_string(),
    );
    config.extensions.insert("curl".to_string(), true);
    config.extensions.insert("intl".to_string(), true);
    config
        .directives
        .insert("memory_limit".to_string(), "256M".to_string());

    let client = client_for(&server);
    let report = synchronize_all(&client, &config)?;

    assert!(report.result.is_success(), "{:?}", report.result.failed);
    assert!(report.php_restarted);
    assert_eq!(report.summary.redeploy, 1);
    assert_eq!(report.summary.update, 2);
    assert_eq!(report.summary.enable, 1);
    assert_eq!(report.summary.no_change, 1);
    assert_eq!(report.result.succeeded.len(), 4);

    redeploy.assert();
    edit.assert();
    enable.assert();
    store.assert();
    restart.assert();
    Ok(())
}

#[test]
fn test_synchronize_without_changes_skips_restart() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _status = get(
        &mut server,
        "vhostGetStatus",
        "<vhostList><vhostInfo><id>3</id><name>shop.example.com:80</name><servers>\
         <vhostServer><id>1</id><status>Ok</status></vhostServer></servers></vhostInfo></vhostList>",
    );
    let restart = server
        .mock("POST", "/ZendServer/Api/restartPhp")
        .expect(0)
        .create();

    let client = client_for(&server);
    let report = synchronize_all(&client, &ZendflowConfig::default())?;

    assert!(!report.php_restarted);
    assert!(!report.result.has_changes());
    restart.assert();
    Ok(())
}

#[test]
fn test_deploy_or_update_updates_matching_base_url() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _list = server
        .mock("GET", "/ZendServer/Api/applicationGetStatus")
        .with_status(200)
        .with_body(envelope(&format!(
            "<applicationsList>{}</applicationsList>",
            shop_info("deployed")
        )))
        .create();
    let update = server
        .mock("POST", "/ZendServer/Api/applicationUpdate")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="appId"\r\n\r\n7\r\n"#.to_string()),
            Matcher::Regex(r#"name="userParams\[db_host\]"\r\n\r\n10\.0\.0\.9\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_body(envelope(&shop_info("deployed")))
        .create();
    let deploy = server
        .mock("POST", "/ZendServer/Api/applicationDeploy")
        .expect(0)
        .create();

    let dir = TempDir::new()?;
    let package = write_package(&dir);
    let client = client_for(&server);

    let outcome = deploy_or_update(&client, &package, &shop_config("10.0.0.9"))?;
    assert!(matches!(outcome, DeployOutcome::Updated(_)));
    assert_eq!(outcome.application().map(|a| a.id.as_str()), Some("7"));

    update.assert();
    deploy.assert();
    Ok(())
}

#[test]
fn test_deploy_or_update_deploys_new_application() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _list = get(&mut server, "applicationGetStatus", "<applicationsList/>");
    let deploy = server
        .mock("POST", "/ZendServer/Api/applicationDeploy")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="baseUrl"\r\n\r\nhttp://shop\.example\.com:80/\r\n"#.to_string()),
            Matcher::Regex(r#"name="userAppName"\r\n\r\nShop\r\n"#.to_string()),
            Matcher::Regex(r#"name="createVhost"\r\n\r\ntrue\r\n"#.to_string()),
        ]))
        .with_status(200)
        .with_body(envelope(&shop_info("deployed")))
        .create();

    let dir = TempDir::new()?;
    let package = write_package(&dir);
    let client = client_for(&server);

    let outcome = deploy_or_update(&client, &package, &shop_config("10.0.0.9"))?;
    assert!(matches!(outcome, DeployOutcome::Deployed(_)));
    deploy.assert();
    Ok(())
}

#[test]
fn test_invalid_package_sends_nothing() -> anyhow::Result<()> {
    let mut server = Server::new();
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let dir = TempDir::new()?;
    let package = write_package(&dir);
    let client = client_for(&server);

    let outcome = deploy_or_update_by_id(&client, &package, &shop_config(""), Some("7"))?;
    match outcome {
        DeployOutcome::Invalid(report) => {
            assert_eq!(report.package_name, "shop");
            assert_eq!(report.missing, vec!["db_host".to_string()]);
        }
        other => panic!("expected invalid outcome, got {:?}", other),
    }
    any.assert();
    Ok(())
}

#[test]
fn test_bootstrap_switches_to_issued_key() -> anyhow::Result<()> {
    let mut server = Server::new();
    let bootstrap = server
        .mock("POST", "/ZendServer/Api/bootstrapSingleServer")
        .match_header(
            "x-zend-signature",
            Matcher::Regex(r"^admin; [0-9a-f]{64}$".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("production".into(), "TRUE".into()),
            Matcher::UrlEncoded("acceptEula".into(), "TRUE".into()),
            Matcher::UrlEncoded("adminPassword".into(), "pw".into()),
        ]))
        .with_status(200)
        .with_body(envelope(
            "<bootstrap><success>true</success><apiKey><name>deployer</name><hash>abc123</hash></apiKey></bootstrap>",
        ))
        .create();

    let issued = Matcher::Regex(r"^deployer; [0-9a-f]{64}$".to_string());
    let daemons = server
        .mock("POST", "/ZendServer/Api/restartDaemon")
        .match_header("x-zend-signature", issued.clone())
        .with_status(200)
        .with_body(envelope(&servers_list(&[("0", "OK")])))
        .expect(3)
        .create();
    let php = server
        .mock("POST", "/ZendServer/Api/restartPhp")
        .match_header("x-zend-signature", issued.clone())
        .with_status(200)
        .with_body(envelope(&servers_list(&[("0", "OK")])))
        .create();
    let _tasks = server
        .mock("GET", "/ZendServer/Api/tasksComplete")
        .match_header("x-zend-signature", issued)
        .with_status(200)
        .with_body(envelope("<tasksComplete>true</tasksComplete>"))
        .create();
    let _status = get(
        &mut server,
        "clusterGetServerStatus",
        &servers_list(&[("0", "OK")]),
    );

    let mut client = ZendClient::new(EndpointTarget::new("unused:1", "admin", "secret"))?
        .with_poller(Poller::new(Duration::ZERO).without_progress());
    let request = BootstrapRequest {
        production: true,
        admin_password: "pw".to_string(),
        order_number: "ORDER".to_string(),
        license_key: "LICENSE".to_string(),
    };

    let outcome = bootstrap_server_at(&mut client, &server.host_with_port(), &request)?;

    assert_eq!(client.target().host(), server.host_with_port());
    assert_eq!(client.target().client_id(), "deployer");
    assert_eq!(client.target().secret(), "abc123");
    assert_eq!(outcome.api_key.name, "deployer");
    assert!(outcome.health.is_healthy());

    bootstrap.assert();
    daemons.assert();
    php.assert();
    Ok(())
}

#[test]
fn test_add_server_recovers_unhealthy_cluster() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _add = server
        .mock("POST", "/ZendServer/Api/clusterAddServer")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("serverName".into(), "web-2".into()),
            Matcher::UrlEncoded("serverIp".into(), "10.0.0.2".into()),
        ]))
        .with_status(200)
        .with_body(envelope(
            "<serverInfo><id>2</id><name>web-2</name><status>restarting</status></serverInfo>",
        ))
        .create();
    let _tasks = tasks_complete(&mut server);

    // wait_for_servers polls twice, then the joined server and the whole
    // cluster are checked, and the cluster again after recovery
    let responses = [
        servers_list(&[("2", "restarting")]),
        servers_list(&[("2", "OK")]),
        servers_list(&[("2", "OK")]),
        servers_list(&[("1", "pendingRestart"), ("2", "OK")]),
        servers_list(&[("1", "OK"), ("2", "OK")]),
    ]
    .map(|body| envelope(&body));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let _status = server
        .mock("GET", "/ZendServer/Api/clusterGetServerStatus")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body_from_request(move |_| {
            let n = counter
                .fetch_add(1, Ordering::SeqCst)
                .min(responses.len() - 1);
            responses[n].clone().into_bytes()
        })
        .create();

    let scd = server
        .mock("POST", "/ZendServer/Api/restartDaemon")
        .match_body(Matcher::UrlEncoded("daemon".into(), "scd".into()))
        .with_status(200)
        .with_body(envelope(&servers_list(&[("1", "restarting")])))
        .create();
    let php = post(&mut server, "restartPhp", &servers_list(&[("1", "OK")]));

    let client = client_for(&server);
    let outcome = add_server(&client, "web-2", "10.0.0.2")?;

    assert!(outcome.recovered);
    assert!(outcome.health.is_healthy());
    assert_eq!(outcome.server.id, "2");
    assert!(outcome.server.status.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 5);

    scd.assert();
    php.assert();
    Ok(())
}

#[test]
fn test_export_config_reads_live_state() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _apps = get(
        &mut server,
        "applicationGetStatus",
        &format!("<applicationsList>{}</applicationsList>", shop_info("deployed")),
    );
    let _app_details = server
        .mock("GET", "/ZendServer/Api/applicationGetDetails")
        .match_query(Matcher::UrlEncoded("application".into(), "7".into()))
        .with_status(200)
        .with_body(envelope(&format!(
            "<applicationDetails>{}<applicationPackage><userParams>\
             <parameter><name>db_host</name><value>10.0.0.9</value></parameter>\
             <parameter><name>greeting</name><value>Fish & Chips</value></parameter>\
             </userParams></applicationPackage></applicationDetails>",
            shop_info("deployed")
        )))
        .create();
    let _vhosts = get(
        &mut server,
        "vhostGetStatus",
        "<vhostList><vhostInfo><id>3</id><name>shop.example.com:80</name></vhostInfo></vhostList>",
    );
    let _vhost_details = server
        .mock("GET", "/ZendServer/Api/vhostGetDetails")
        .match_query(Matcher::UrlEncoded("vhost".into(), "3".into()))
        .with_status(200)
        .with_body(envelope(
            "<vhostDetails><vhostInfo><id>3</id><name>shop.example.com:80</name></vhostInfo>\
             <vhostExtended><template><![CDATA[<VirtualHost *:80></VirtualHost>]]></template></vhostExtended></vhostDetails>",
        ))
        .create();
    let _extensions = get(
        &mut server,
        "configurationExtensionsList",
        "<extensions><extension><name>curl</name><loaded>true</loaded></extension></extensions>",
    );
    let _directives = get(
        &mut server,
        "configurationDirectivesList",
        "<directives><directive><name>memory_limit</name><fileValue/><defaultValue>128M</defaultValue></directive></directives>",
    );
    let _queues = get(
        &mut server,
        "jobqueueGetQueues",
        "<queues><queue><name>default</name><priority>2</priority><max_http_jobs>10</max_http_jobs>\
         <max_wait_time>5</max_wait_time><http_connection_timeout>30</http_connection_timeout>\
         <http_job_timeout>120</http_job_timeout><http_job_retry_count>10</http_job_retry_count>\
         <http_job_retry_timeout>1</http_job_retry_timeout></queue></queues>",
    );

    let client = client_for(&server);
    let config = export_config(&client)?;

    let shop = &config.applications["shop"];
    assert_eq!(shop.base_url.as_deref(), Some("http://shop.example.com:80/"));
    assert_eq!(shop.display_name.as_deref(), Some("Shop"));
    assert_eq!(shop.params["db_host"], "10.0.0.9");
    assert_eq!(shop.params["greeting"], "Fish & Chips");
    assert_eq!(
        config.vhosts["shop.example.com:80"],
        "<VirtualHost *:80></VirtualHost>"
    );
    assert!(config.extensions["curl"]);
    assert_eq!(config.directives["memory_limit"], "128M");
    assert_eq!(config.job_queues["default"].http_job_timeout, 120);
    Ok(())
}

#[test]
fn test_deploy_by_id_updates_chosen_application() -> anyhow::Result<()> {
    let mut server = Server::new();
    let list = server
        .mock("GET", "/ZendServer/Api/applicationGetStatus")
        .match_query(Matcher::Any)
        .expect(0)
        .create();
    let update = server
        .mock("POST", "/ZendServer/Api/applicationUpdate")
        .match_body(Matcher::Regex(r#"name="appId"\r\n\r\n12\r\n"#.to_string()))
        .with_status(200)
        .with_body(envelope(&shop_info("deployed").replace("<id>7</id>", "<id>12</id>")))
        .create();

    let dir = TempDir::new()?;
    let package = write_package(&dir);
    let client = client_for(&server);

    let outcome = deploy_or_update_by_id(&client, &package, &shop_config("10.0.0.9"), Some("12"))?;
    assert!(matches!(outcome, DeployOutcome::Updated(_)));
    assert_eq!(outcome.application().map(|a| a.id.as_str()), Some("12"));

    update.assert();
    list.assert();
    Ok(())
}

#[test]
fn test_deploy_by_id_without_id_deploys_new() -> anyhow::Result<()> {
    let mut server = Server::new();
    let deploy = server
        .mock("POST", "/ZendServer/Api/applicationDeploy")
        .match_body(Matcher::Regex(
            r#"name="baseUrl"\r\n\r\nhttp://shop\.example\.com:80/\r\n"#.to_string(),
        ))
        .with_status(200)
        .with_body(envelope(&shop_info("deployed")))
        .create();
    let update = server
        .mock("POST", "/ZendServer/Api/applicationUpdate")
        .expect(0)
        .create();

    let dir = TempDir::new()?;
    let package = write_package(&dir);
    let client = client_for(&server);

    let outcome = deploy_or_update_by_id(&client, &package, &shop_config("10.0.0.9"), None)?;
    assert!(matches!(outcome, DeployOutcome::Deployed(_)));

    deploy.assert();
    update.assert();
    Ok(())
}

#[test]
fn test_create_cluster_waits_for_members() -> anyhow::Result<()> {
    let mut server = Server::new();
    let join = server
        .mock("POST", "/ZendServer/Api/serverAddToCluster")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("serverName".into(), "web-1".into()),
            Matcher::UrlEncoded("dbHost".into(), "10.0.0.20".into()),
            Matcher::UrlEncoded("dbUsername".into(), "zend".into()),
            Matcher::UrlEncoded("dbPassword".into(), "pw".into()),
            Matcher::UrlEncoded("nodeIp".into(), "10.0.0.1".into()),
            Matcher::UrlEncoded("dbName".into(), "ZendServer".into()),
        ]))
        .with_status(200)
        .with_body(envelope(
            "<serverInfo><id>1</id><name>web-1</name><status>restarting</status></serverInfo>",
        ))
        .create();
    let _tasks = tasks_complete(&mut server);

    let responses = [
        servers_list(&[("1", "restarting")]),
        servers_list(&[("1", "redeploying")]),
        servers_list(&[("1", "OK")]),
    ]
    .map(|body| envelope(&body));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let _status = server
        .mock("GET", "/ZendServer/Api/clusterGetServerStatus")
        .with_status(200)
        .with_body_from_request(move |_| {
            let n = counter
                .fetch_add(1, Ordering::SeqCst)
                .min(responses.len() - 1);
            responses[n].clone().into_bytes()
        })
        .create();

    let request = ClusterJoinRequest {
        server_name: "web-1".to_string(),
        db_host: "10.0.0.20".to_string(),
        db_username: "zend".to_string(),
        db_password: "pw".to_string(),
        node_ip: "10.0.0.1".to_string(),
        db_name: "ZendServer".to_string(),
    };
    let client = client_for(&server);
    let health = create_cluster(&client, &request)?;

    assert!(health.is_healthy());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    join.assert();
    Ok(())
}

#[test]
fn test_create_cluster_reports_unhealthy_member() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _join = post(
        &mut server,
        "serverAddToCluster",
        "<serverInfo><id>1</id><name>web-1</name><status>restarting</status></serverInfo>",
    );
    let _tasks = tasks_complete(&mut server);
    let _status = get(
        &mut server,
        "clusterGetServerStatus",
        &servers_list(&[("1", "notResponding")]),
    );

    let request = ClusterJoinRequest {
        server_name: "web-1".to_string(),
        db_host: "10.0.0.20".to_string(),
        db_username: "zend".to_string(),
        db_password: "pw".to_string(),
        node_ip: "10.0.0.1".to_string(),
        db_name: "ZendServer".to_string(),
    };
    let client = client_for(&server);
    let health = create_cluster(&client, &request)?;

    assert!(!health.is_healthy());
    assert_eq!(health.unhealthy().len(), 1);
    Ok(())
}

#[test]
fn test_directive_values_compare_trimmed() -> anyhow::Result<()> {
    let mut server = Server::new();
    let _vhosts = get(&mut server, "vhostGetStatus", "<vhostList/>");
    let _directives = get(
        &mut server,
        "configurationDirectivesList",
        "<directives><directive><name>memory_limit</name><fileValue>256M</fileValue></directive></directives>",
    );
    let store = server
        .mock("POST", "/ZendServer/Api/configurationStoreDirectives")
        .expect(0)
        .create();
    let restart = server
        .mock("POST", "/ZendServer/Api/restartPhp")
        .expect(0)
        .create();

    let mut config = ZendflowConfig::default();
    config
        .directives
        .insert("memory_limit".to_string(), " 256M ".to_string());

    let client = client_for(&server);
    let report = synchronize_all(&client, &config)?;

    assert_eq!(report.summary.no_change, 1);
    assert_eq!(report.summary.update, 0);
    assert!(!report.php_restarted);
    store.assert();
    restart.assert();
    Ok(())
}
